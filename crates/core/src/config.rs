//! Engine configuration
//!
//! Every field has a default that reproduces the canonical FBP/advisory
//! behaviour, so `EngineConfig::default()` is what production callers use
//! unless they have a reason to override a constant.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisoryError, Result};

/// Tunable constants of the advisory engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grass fuel load for O1 fuel types (kg/m²)
    pub grass_fuel_load: f64,
    /// HFI at which a station or cell becomes an advisory (kW/m)
    pub advisory_hfi: f64,
    /// HFI at which a station or cell becomes a warning (kW/m)
    pub warning_hfi: f64,
    /// CFB below which a fire is classified as surface fire
    pub surface_fire_cfb: f64,
    /// CFB at or above which a fire is classified as crown fire
    pub crown_fire_cfb: f64,
    /// Relative HFI error at which the inverse FFMC search stops
    pub search_tolerance: f64,
    /// Iteration cap for the inverse FFMC search
    pub search_max_iterations: u32,
    /// Elapsed minutes for the short fire size projection
    pub short_fire_size_minutes: f64,
    /// Elapsed minutes for the long fire size projection
    pub long_fire_size_minutes: f64,
    /// Day of year of minimum foliar moisture; `None` derives it from location
    pub min_fmc_day_of_year: Option<u32>,
    /// Percentage of a zone's combustible area that puts the zone under advisory
    pub zone_advisory_percentage: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grass_fuel_load: 3.5,
            advisory_hfi: 4000.0,
            warning_hfi: 10000.0,
            surface_fire_cfb: 0.1,
            crown_fire_cfb: 0.9,
            search_tolerance: 0.01,
            search_max_iterations: 100,
            short_fire_size_minutes: 30.0,
            long_fire_size_minutes: 60.0,
            min_fmc_day_of_year: None,
            zone_advisory_percentage: 20.0,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`AdvisoryError::Config`] when the document does not parse or
    /// describes an inconsistent configuration.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| AdvisoryError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants
    ///
    /// # Errors
    /// Returns [`AdvisoryError::Config`] naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if !positive(self.grass_fuel_load) {
            return Err(AdvisoryError::config("grass_fuel_load must be positive"));
        }
        if !positive(self.advisory_hfi) || !positive(self.warning_hfi - self.advisory_hfi) {
            return Err(AdvisoryError::config(
                "warning_hfi must exceed a positive advisory_hfi",
            ));
        }
        if !(0.0..=1.0).contains(&self.surface_fire_cfb)
            || !(0.0..=1.0).contains(&self.crown_fire_cfb)
            || self.surface_fire_cfb > self.crown_fire_cfb
        {
            return Err(AdvisoryError::config(
                "fire type CFB bounds must satisfy 0 <= surface <= crown <= 1",
            ));
        }
        if !positive(self.search_tolerance) || self.search_max_iterations == 0 {
            return Err(AdvisoryError::config(
                "search_tolerance and search_max_iterations must be positive",
            ));
        }
        if !positive(self.short_fire_size_minutes) || !positive(self.long_fire_size_minutes) {
            return Err(AdvisoryError::config("fire size durations must be positive"));
        }
        if let Some(day) = self.min_fmc_day_of_year {
            if !(1..=366).contains(&day) {
                return Err(AdvisoryError::config(format!(
                    "min_fmc_day_of_year must be 1-366, got {day}"
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.zone_advisory_percentage) {
            return Err(AdvisoryError::config(
                "zone_advisory_percentage must be 0-100",
            ));
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
