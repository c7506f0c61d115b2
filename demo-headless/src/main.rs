use std::error::Error;
use std::path::PathBuf;

use chrono::{Datelike, Duration, TimeZone, Utc};
use clap::Parser;
use geo::{polygon, MultiPolygon};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildfire_advisory_core::{
    calculate_advisories, calculate_season, classify_and_aggregate,
    core_types::{Celsius, KilometersPerHour, Millimeters, Percent},
    fbp::mean_intensity_group,
    hfi::RawHfiRaster,
    EngineConfig, FireZone, FuelFamily, FuelType, RunParameters, RunType, ScenarioSampler,
    StationConditions, StationLocation, ThresholdCrossing, WeatherObservation,
};

/// Wildfire advisory demo with configurable station weather
#[derive(Parser, Debug)]
#[command(name = "wildfire-advisory-demo")]
#[command(about = "FWI/FBP station advisories and HFI zone aggregation", long_about = None)]
struct Args {
    /// Noon temperature in °C
    #[arg(short, long, default_value_t = 26.0)]
    temperature: f64,

    /// Noon relative humidity in %
    #[arg(long, default_value_t = 25.0)]
    humidity: f64,

    /// Noon 10 m wind speed in km/h
    #[arg(short, long, default_value_t = 18.0)]
    wind_speed: f64,

    /// 24 hour precipitation in mm
    #[arg(short, long, default_value_t = 0.0)]
    precipitation: f64,

    /// Number of consecutive days with the same weather
    #[arg(short, long, default_value_t = 10)]
    days: u32,

    /// Station latitude (°N)
    #[arg(long, default_value_t = 50.7)]
    latitude: f64,

    /// Station longitude (°, west negative)
    #[arg(long, default_value_t = -120.4)]
    longitude: f64,

    /// Station elevation in m
    #[arg(long)]
    elevation: Option<f64>,

    /// Grass curing (%) applied to O1 fuels
    #[arg(long, default_value_t = 80.0)]
    grass_cure: f64,

    /// Engine configuration in TOML; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the synthetic HFI raster
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Synthetic raster size in cells (square)
    #[arg(long, default_value_t = 60)]
    grid_size: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };

    println!("=== Wildfire Advisory Demo ===\n");

    // Daily indices over a run of identical days
    let start = Utc.with_ymd_and_hms(2024, 7, 1, 20, 0, 0).single().ok_or("invalid start date")?;
    let observations: Vec<WeatherObservation> = (0..args.days)
        .map(|day| WeatherObservation {
            station_code: 1,
            observed_at: start + Duration::days(i64::from(day)),
            temperature: Some(Celsius::new(args.temperature)),
            relative_humidity: Some(Percent::new(args.humidity)),
            wind_speed: Some(KilometersPerHour::new(args.wind_speed)),
            wind_direction: None,
            precipitation: Some(Millimeters::new(args.precipitation)),
        })
        .collect();
    let season = calculate_season(None, &observations, args.latitude)?;

    println!("Day        |   FFMC |    DMC |     DC |    ISI |    BUI |    FWI");
    println!("-----------|--------|--------|--------|--------|--------|-------");
    for (observation, indices) in observations.iter().zip(&season) {
        println!(
            "{} | {:6.1} | {:6.1} | {:6.1} | {:6.1} | {:6.1} | {:6.1}",
            observation.observed_at.date_naive(),
            indices.ffmc,
            indices.dmc,
            indices.dc,
            indices.isi,
            indices.bui,
            indices.fwi
        );
    }

    // Advisories for every fuel type at the final day's indices
    let (Some(last_day), Some(last_observation)) = (season.last(), observations.last()) else {
        println!("\nNo days requested, nothing to advise on");
        return Ok(());
    };
    let location = StationLocation {
        latitude: args.latitude,
        longitude: args.longitude,
        elevation: args.elevation,
    };
    let stations: Vec<StationConditions> = FuelType::ALL
        .into_iter()
        .map(|fuel_type| {
            let mut conditions = StationConditions::from_indices(
                1,
                location,
                fuel_type,
                last_observation.observed_at.ordinal(),
                last_day,
                args.wind_speed,
            );
            if matches!(fuel_type.family(), FuelFamily::Grass) {
                conditions.fuel_overrides.grass_cure = Some(args.grass_cure);
            }
            conditions
        })
        .collect();

    println!("\nFuel |  ROS m/min |  CFB | HFI kW/m | Type | IG | 60 min ha | FFMC@4000 | FFMC@10000");
    println!("-----|------------|------|----------|------|----|-----------|-----------|-----------");
    let mut groups = Vec::new();
    for result in calculate_advisories(&stations, &config) {
        let advisory = result?;
        let crossing = |c: ThresholdCrossing| {
            if c.reached {
                format!("{:9.1}", c.ffmc)
            } else {
                format!("{:>9}", "n/a")
            }
        };
        println!(
            "{:>4} | {:10.2} | {:4.2} | {:8.0} | {:>4} | {:2} | {:9.2} | {} | {}",
            advisory.fuel_type.code(),
            *advisory.rate_of_spread,
            advisory.crown_fraction_burned,
            *advisory.head_fire_intensity,
            advisory.fire_type.code(),
            advisory.intensity_group.value(),
            *advisory.fire_size_60min,
            crossing(advisory.advisory_threshold),
            crossing(advisory.warning_threshold),
        );
        groups.push(advisory.intensity_group);
    }
    if let Some(mean) = mean_intensity_group(&groups) {
        println!("Mean intensity group: {mean:.1}");
    }

    // Synthetic HFI raster aggregated over two zones
    let size = args.grid_size;
    let grid = ScenarioSampler::new(args.seed).hfi_grid(size, size)?;
    let half = size as f64 / 2.0;
    let full = size as f64;
    let zones = vec![
        FireZone {
            id: 1,
            name: "West".to_string(),
            geometry: MultiPolygon::new(vec![polygon![
                (x: 0.0, y: 0.0), (x: half, y: 0.0), (x: half, y: full), (x: 0.0, y: full)
            ]]),
            combustible: None,
            fuel_coverage: Vec::new(),
        },
        FireZone {
            id: 2,
            name: "East".to_string(),
            geometry: MultiPolygon::new(vec![polygon![
                (x: half, y: 0.0), (x: full, y: 0.0), (x: full, y: full), (x: half, y: full)
            ]]),
            combustible: None,
            fuel_coverage: Vec::new(),
        },
    ];
    let run = RunParameters {
        run_type: RunType::Forecast,
        run_datetime: Utc::now(),
        for_date: last_observation.observed_at.date_naive(),
    };
    let summary = classify_and_aggregate(RawHfiRaster::from(grid), run, &zones, &config)?;

    println!("\nZone | Advisory % | Warning % | Under advisory");
    println!("-----|------------|-----------|---------------");
    for zone in &summary.zones {
        println!(
            "{:4} | {:10.1} | {:9.1} | {}",
            zone.zone_id,
            zone.advisory_percentage,
            zone.warning_percentage,
            zone.is_under_advisory(&config)
        );
    }

    info!("Demo complete: {} HFI polygons", summary.polygons.len());
    Ok(())
}
