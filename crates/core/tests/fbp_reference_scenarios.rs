//! Fire Behaviour Prediction validation
//!
//! Reference values were computed independently from the equations of
//! Forestry Canada Fire Danger Group (1992), ST-X-3, with the Wotton et al.
//! (2009) updates for C6 and grass curing.
//!
//! Run tests with: cargo test --test `fbp_reference_scenarios`

use approx::assert_relative_eq;
use tracing_subscriber::EnvFilter;
use wildfire_advisory_core::{
    calculate_advisories, calculate_fire_behaviour_advisory,
    fbp::{
        critical_surface_intensity, find_ffmc_for_hfi, flame_length, foliar_moisture_content,
        mean_intensity_group, rate_of_spread, surface_fuel_consumption,
    },
    fwi::initial_spread_index,
    AdvisoryError, EngineConfig, FireType, FuelType, IntensityGroup, ResolvedFuel,
    StationConditions, StationFuelOverrides, StationLocation,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn table(fuel_type: FuelType) -> ResolvedFuel {
    ResolvedFuel::from_table(fuel_type).unwrap()
}

fn cured(fuel_type: FuelType, cure: f64) -> ResolvedFuel {
    ResolvedFuel::resolve(
        fuel_type,
        &StationFuelOverrides {
            grass_cure: Some(cure),
            ..StationFuelOverrides::default()
        },
    )
    .unwrap()
}

fn station(fuel_type: FuelType, ffmc: f64, bui: f64, wind_speed: f64) -> StationConditions {
    StationConditions {
        station_code: 1203,
        location: StationLocation {
            latitude: 50.0,
            longitude: -120.0,
            elevation: Some(1000.0),
        },
        fuel_type,
        fuel_overrides: StationFuelOverrides::default(),
        day_of_year: 200,
        ffmc: Some(ffmc),
        bui: Some(bui),
        wind_speed: Some(wind_speed),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEST 1: Rate of spread per fuel family
// ═══════════════════════════════════════════════════════════════════════════════

/// Ponderosa pine, moderate conditions
///
/// RSI = 45 × (1 - e^(-0.0305 × 10))^2, BE at BUI 50 against BUIo 106
#[test]
fn test_c7_rate_of_spread() {
    let ros = rate_of_spread(&table(FuelType::C7), Some(10.0), Some(50.0), Some(95.0), Some(1.2))
        .unwrap();
    assert_relative_eq!(ros, 2.854, epsilon = 0.01);
}

#[test]
fn test_conifer_plantation_blends_crown_spread() {
    let fuel = table(FuelType::C6);
    let ros = rate_of_spread(&fuel, Some(15.0), Some(80.0), Some(95.0), Some(2.03816)).unwrap();
    assert_relative_eq!(ros, 26.982, max_relative = 0.001);
}

#[test]
fn test_mixedwood_and_deciduous() {
    let m1 = rate_of_spread(&table(FuelType::M1), Some(10.0), Some(60.0), Some(100.0), Some(1.0))
        .unwrap();
    assert_relative_eq!(m1, 8.2064, max_relative = 0.001);
    let d1 = rate_of_spread(&table(FuelType::D1), Some(10.0), Some(40.0), Some(100.0), Some(1.0))
        .unwrap();
    let d2 = rate_of_spread(&table(FuelType::D2), Some(10.0), Some(40.0), Some(100.0), Some(1.0))
        .unwrap();
    assert_relative_eq!(d1, 2.4955, max_relative = 0.001);
    assert_relative_eq!(d2, d1 * 0.2, max_relative = 1e-9);
}

/// Standing grass at 60% curing and 20 km/h
#[test]
fn test_o1b_grass_branch() {
    let isi = initial_spread_index(90.0, 20.0).unwrap();
    let ros =
        rate_of_spread(&cured(FuelType::O1b, 60.0), Some(isi), Some(50.0), Some(95.0), Some(3.5))
            .unwrap();
    assert_relative_eq!(ros, 7.872, max_relative = 0.001);

    let mut conditions = station(FuelType::O1b, 90.0, 50.0, 20.0);
    conditions.fuel_overrides.grass_cure = Some(60.0);
    let advisory =
        calculate_fire_behaviour_advisory(&conditions, &EngineConfig::default()).unwrap();
    assert_eq!(advisory.crown_fraction_burned, 0.0);
    assert_eq!(advisory.fire_type, FireType::Surface);
    assert_relative_eq!(*advisory.rate_of_spread, 7.872, max_relative = 0.001);
}

#[test]
fn test_missing_isi_is_parameter_error() {
    for fuel_type in [FuelType::C2, FuelType::D1, FuelType::M3, FuelType::S1] {
        let result = rate_of_spread(&table(fuel_type), None, Some(60.0), Some(100.0), Some(2.0));
        assert_eq!(result, Err(AdvisoryError::Parameter { name: "isi" }));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEST 2: Supporting equations
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_foliar_moisture_spring_dip() {
    let config = EngineConfig::default();
    let summer = foliar_moisture_content(50.0, -120.0, Some(1000.0), 200, None).unwrap();
    let dip = foliar_moisture_content(50.0, -120.0, Some(1000.0), 147, None).unwrap();
    assert_eq!(summer, 120.0);
    assert_eq!(dip, 85.0);
    assert_eq!(config.min_fmc_day_of_year, None);
}

#[test]
fn test_c1_consumption_follows_ffmc() {
    let config = EngineConfig::default();
    let c1 = table(FuelType::C1);
    let dry = surface_fuel_consumption(&c1, 50.0, 90.0, &config).unwrap();
    let damp = surface_fuel_consumption(&c1, 50.0, 80.0, &config).unwrap();
    assert!(dry > damp);
}

#[test]
fn test_crown_threshold_and_flame_length() {
    assert_relative_eq!(critical_surface_intensity(100.0, 3.0), 875.249, max_relative = 1e-5);
    assert_relative_eq!(flame_length(10000.0), 0.0775 * 10000f64.powf(0.46));
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEST 3: Complete advisory
// ═══════════════════════════════════════════════════════════════════════════════

/// Boreal spruce in summer, FFMC 90, BUI 80, 20 km/h: a crown fire
#[test]
fn test_boreal_spruce_crown_fire() {
    let config = EngineConfig::default();
    let advisory =
        calculate_fire_behaviour_advisory(&station(FuelType::C2, 90.0, 80.0, 20.0), &config)
            .unwrap();
    assert_relative_eq!(*advisory.head_fire_intensity, 19787.5, max_relative = 0.001);
    assert_eq!(advisory.fire_type, FireType::Crown);
    assert_eq!(advisory.intensity_group, IntensityGroup::Five);
    assert!(advisory.warning_threshold.reached);
    assert_relative_eq!(advisory.warning_threshold.hfi, 10000.0, max_relative = 0.01);
    assert!(advisory.advisory_threshold.ffmc < advisory.warning_threshold.ffmc);
}

/// Leafless aspen in light wind cannot reach warning intensity
#[test]
fn test_unreachable_warning_reports_maximum() {
    let config = EngineConfig::default();
    let advisory =
        calculate_fire_behaviour_advisory(&station(FuelType::D2, 85.0, 20.0, 5.0), &config)
            .unwrap();
    let warning = advisory.warning_threshold;
    assert!(!warning.reached);
    assert_eq!(warning.ffmc, 101.0);
    assert!(warning.hfi < 10000.0);
}

#[test]
fn test_threshold_search_is_idempotent() {
    let config = EngineConfig::default();
    let conditions = station(FuelType::C3, 88.0, 60.0, 15.0);
    let advisory = calculate_fire_behaviour_advisory(&conditions, &config).unwrap();
    let crossing = advisory.advisory_threshold;
    assert!(crossing.reached);

    // Re-running the advisory at the crossing FFMC reproduces the crossing HFI
    let mut at_crossing = conditions.clone();
    at_crossing.ffmc = Some(crossing.ffmc);
    let rerun = calculate_fire_behaviour_advisory(&at_crossing, &config).unwrap();
    assert_relative_eq!(*rerun.head_fire_intensity, crossing.hfi, max_relative = 1e-9);
    assert_eq!(rerun.advisory_threshold, crossing);

    let again = find_ffmc_for_hfi(
        config.advisory_hfi,
        |ffmc| {
            let mut c = conditions.clone();
            c.ffmc = Some(ffmc);
            Ok(*calculate_fire_behaviour_advisory(&c, &config)?.head_fire_intensity)
        },
        &config,
    )
    .unwrap();
    assert_eq!(again, crossing);
}

#[test]
fn test_batch_advisories_and_planning_summary() {
    let config = EngineConfig::default();
    let stations = vec![
        station(FuelType::C2, 90.0, 80.0, 20.0),
        station(FuelType::D1, 80.0, 30.0, 5.0),
        station(FuelType::C7, 88.0, 60.0, 10.0),
    ];
    let results = calculate_advisories(&stations, &config);
    let groups: Vec<IntensityGroup> = results
        .iter()
        .map(|r| r.as_ref().unwrap().intensity_group)
        .collect();
    assert_eq!(groups[0], IntensityGroup::Five);
    let mean = mean_intensity_group(&groups).unwrap();
    assert!((1.0..=5.0).contains(&mean));
}

#[test]
fn test_unknown_fuel_code_fails() {
    assert_eq!(
        "C9".parse::<FuelType>(),
        Err(AdvisoryError::UnknownFuelType {
            code: "C9".to_string()
        })
    );
}
