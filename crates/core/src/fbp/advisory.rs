//! Per-station fire behaviour advisory
//!
//! Composes foliar moisture, consumption, spread, crowning, intensity and
//! growth into one [`FireBehaviourAdvisory`], and locates the FFMC at which
//! the station's fire would cross the advisory and warning intensities.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::consumption::{sfc_raw, total_fuel_consumption};
use super::crown_fire::FireType;
use super::fire_size::{length_to_breadth_ratio, FireGrowth};
use super::foliar_moisture::foliar_moisture_content;
use super::intensity::{flame_length, head_fire_intensity, IntensityGroup};
use super::spread::{head_fire_spread_raw, ros_raw, SpreadInputs};
use super::threshold_search::{find_ffmc_for_hfi, ThresholdCrossing};
use crate::config::EngineConfig;
use crate::core_types::fuel::{FuelType, ResolvedFuel, StationFuelOverrides};
use crate::core_types::indices::FireIndices;
use crate::core_types::units::{
    Hectares, KilogramsPerSquareMeter, KilowattsPerMeter, Meters, MetersPerMinute, Percent,
};
use crate::error::{check_non_negative, check_range, required, Result};
use crate::fwi::{back_isi_raw, isi_raw, FFMC_MAX};

/// Geographic position of a weather station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level; `None` or a value at or below 0 selects the sea-level FMC model
    pub elevation: Option<f64>,
}

/// Everything needed to compute one station's advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConditions {
    pub station_code: u32,
    pub location: StationLocation,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub fuel_overrides: StationFuelOverrides,
    pub day_of_year: u32,
    pub ffmc: Option<f64>,
    pub bui: Option<f64>,
    /// Noon wind speed (km/h)
    pub wind_speed: Option<f64>,
}

impl StationConditions {
    /// Conditions for a station from its computed daily indices
    pub fn from_indices(
        station_code: u32,
        location: StationLocation,
        fuel_type: FuelType,
        day_of_year: u32,
        indices: &FireIndices,
        wind_speed: f64,
    ) -> Self {
        Self {
            station_code,
            location,
            fuel_type,
            fuel_overrides: StationFuelOverrides::default(),
            day_of_year,
            ffmc: Some(indices.ffmc),
            bui: Some(indices.bui),
            wind_speed: Some(wind_speed),
        }
    }
}

/// Fire behaviour prediction for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireBehaviourAdvisory {
    pub station_code: u32,
    pub fuel_type: FuelType,
    pub rate_of_spread: MetersPerMinute,
    /// 0-1
    pub crown_fraction_burned: f64,
    pub surface_fuel_consumption: KilogramsPerSquareMeter,
    pub total_fuel_consumption: KilogramsPerSquareMeter,
    pub head_fire_intensity: KilowattsPerMeter,
    pub fire_type: FireType,
    pub flame_length: Meters,
    pub fire_size_30min: Hectares,
    pub fire_size_60min: Hectares,
    pub foliar_moisture_content: Percent,
    pub length_to_breadth: f64,
    pub intensity_group: IntensityGroup,
    /// FFMC at which HFI reaches the advisory intensity
    pub advisory_threshold: ThresholdCrossing,
    /// FFMC at which HFI reaches the warning intensity
    pub warning_threshold: ThresholdCrossing,
}

/// Surface and crown behaviour at one FFMC
#[derive(Debug, Clone, Copy)]
struct Behaviour {
    sfc: f64,
    ros: f64,
    cfb: f64,
    tfc: f64,
    hfi: f64,
}

/// Validated station inputs with FFMC left free
struct StationModel<'a> {
    fuel: ResolvedFuel,
    fmc: f64,
    bui: f64,
    wind_speed: f64,
    config: &'a EngineConfig,
}

impl StationModel<'_> {
    fn behaviour_at(&self, ffmc: f64) -> Result<Behaviour> {
        let sfc = sfc_raw(&self.fuel, self.bui, ffmc, self.config.grass_fuel_load);
        let spread = head_fire_spread_raw(
            &self.fuel,
            SpreadInputs {
                isi: isi_raw(ffmc, self.wind_speed),
                bui: self.bui,
                fmc: self.fmc,
                sfc,
            },
        )?;
        let ros = spread.rate_of_spread;
        let cfb = spread.crown_fraction_burned;
        let tfc = total_fuel_consumption(&self.fuel, sfc, cfb);
        Ok(Behaviour {
            sfc,
            ros,
            cfb,
            tfc,
            hfi: head_fire_intensity(tfc, ros),
        })
    }

    fn back_rate_of_spread(&self, ffmc: f64, sfc: f64) -> Result<f64> {
        ros_raw(
            &self.fuel,
            SpreadInputs {
                isi: back_isi_raw(ffmc, self.wind_speed),
                bui: self.bui,
                fmc: self.fmc,
                sfc,
            },
        )
    }

    fn threshold(&self, target_hfi: f64) -> Result<ThresholdCrossing> {
        find_ffmc_for_hfi(target_hfi, |ffmc| Ok(self.behaviour_at(ffmc)?.hfi), self.config)
    }
}

/// Calculate the fire behaviour advisory for one station
///
/// # Errors
/// Any missing index or wind value is an [`crate::AdvisoryError::Parameter`];
/// out-of-range inputs are [`crate::AdvisoryError::NumericDomain`]. The
/// advisory is all or nothing.
pub fn calculate_fire_behaviour_advisory(
    conditions: &StationConditions,
    config: &EngineConfig,
) -> Result<FireBehaviourAdvisory> {
    let ffmc = required(conditions.ffmc, "ffmc")?;
    let ffmc = check_range("ffmc", ffmc, 0.0, FFMC_MAX, "0-101")?;
    let bui = check_non_negative("bui", required(conditions.bui, "bui")?)?;
    let wind_speed = required(conditions.wind_speed, "wind_speed")?;
    let wind_speed = check_non_negative("wind_speed", wind_speed)?;
    let fuel = ResolvedFuel::resolve(conditions.fuel_type, &conditions.fuel_overrides)?;
    let location = conditions.location;
    let fmc = foliar_moisture_content(
        location.latitude,
        location.longitude,
        location.elevation,
        conditions.day_of_year,
        config.min_fmc_day_of_year,
    )?;

    let model = StationModel {
        fuel,
        fmc,
        bui,
        wind_speed,
        config,
    };
    let behaviour = model.behaviour_at(ffmc)?;
    let growth = FireGrowth {
        fuel_type: fuel.fuel_type,
        wind_speed,
        head_rate_of_spread: behaviour.ros,
        back_rate_of_spread: model.back_rate_of_spread(ffmc, behaviour.sfc)?,
        crown_fraction_burned: behaviour.cfb,
    };

    debug!(
        "Station {} {}: ROS={:.2} m/min CFB={:.2} HFI={:.0} kW/m",
        conditions.station_code, fuel.fuel_type, behaviour.ros, behaviour.cfb, behaviour.hfi
    );

    Ok(FireBehaviourAdvisory {
        station_code: conditions.station_code,
        fuel_type: fuel.fuel_type,
        rate_of_spread: MetersPerMinute::new(behaviour.ros),
        crown_fraction_burned: behaviour.cfb,
        surface_fuel_consumption: KilogramsPerSquareMeter::new(behaviour.sfc),
        total_fuel_consumption: KilogramsPerSquareMeter::new(behaviour.tfc),
        head_fire_intensity: KilowattsPerMeter::new(behaviour.hfi),
        fire_type: FireType::classify(behaviour.cfb, config),
        flame_length: Meters::new(flame_length(behaviour.hfi)),
        fire_size_30min: growth.area_after(config.short_fire_size_minutes)?,
        fire_size_60min: growth.area_after(config.long_fire_size_minutes)?,
        foliar_moisture_content: Percent::new(fmc),
        length_to_breadth: length_to_breadth_ratio(fuel.fuel_type, wind_speed),
        intensity_group: IntensityGroup::from_hfi(behaviour.hfi),
        advisory_threshold: model.threshold(config.advisory_hfi)?,
        warning_threshold: model.threshold(config.warning_hfi)?,
    })
}

/// Calculate advisories for many stations in parallel
///
/// Stations are independent: one station's error does not affect another.
/// Results are in input order.
pub fn calculate_advisories(
    stations: &[StationConditions],
    config: &EngineConfig,
) -> Vec<Result<FireBehaviourAdvisory>> {
    let results: Vec<_> = stations
        .par_iter()
        .map(|station| calculate_fire_behaviour_advisory(station, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    let advisories = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter(|a| *a.head_fire_intensity >= config.advisory_hfi)
        .count();
    info!(
        "Calculated {} station advisories: {} at or above {:.0} kW/m, {} failed",
        stations.len(),
        advisories,
        config.advisory_hfi,
        failed
    );
    results
}
