//! Van Wagner crown fire initiation as used by the FBP System
//!
//! Implements the crown fire transition in its FBP form:
//! - Critical surface intensity for crown fire initiation
//! - Critical surface spread rate (RSO)
//! - Crown fraction burned
//! - Fire type classification from CFB
//!
//! # Scientific References
//! - Van Wagner, C.E. (1977). "Conditions for the start and spread of crown fire"
//!   Canadian Journal of Forest Research, 7(1), 23-34
//! - Forestry Canada Fire Danger Group (1992). "Development and structure of
//!   the Canadian Forest Fire Behavior Prediction System". ST-X-3, Eq. 56-58

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Fire type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireType {
    /// Surface fire, CFB below the surface bound
    Surface,
    /// Intermittent crown fire - torching of individual trees
    IntermittentCrown,
    /// Continuous crown fire
    Crown,
}

impl FireType {
    /// Classify a crown fraction burned using the configured bounds
    pub fn classify(crown_fraction_burned: f64, config: &EngineConfig) -> Self {
        if crown_fraction_burned < config.surface_fire_cfb {
            FireType::Surface
        } else if crown_fraction_burned < config.crown_fire_cfb {
            FireType::IntermittentCrown
        } else {
            FireType::Crown
        }
    }

    /// Short code used on advisory tables (SUR / IC / CC)
    pub const fn code(self) -> &'static str {
        match self {
            FireType::Surface => "SUR",
            FireType::IntermittentCrown => "IC",
            FireType::Crown => "CC",
        }
    }
}

/// Calculate critical surface fire intensity for crown fire initiation
///
/// Van Wagner (1977) in FBP form:
/// CSI = 0.001 × CBH^1.5 × (460 + 25.9 × FMC)^1.5
///
/// # Arguments
/// * `foliar_moisture_content` - Foliar moisture content (%), typical 85-120
/// * `crown_base_height` - Height to base of crown (m)
///
/// # Returns
/// Critical surface fire intensity in kW/m
pub fn critical_surface_intensity(foliar_moisture_content: f64, crown_base_height: f64) -> f64 {
    0.001 * crown_base_height.powf(1.5) * (460.0 + 25.9 * foliar_moisture_content).powf(1.5)
}

/// Critical surface spread rate for crowning, RSO = CSI / (300 × SFC), in m/min
pub fn critical_spread_rate(critical_surface_intensity: f64, surface_fuel_consumption: f64) -> f64 {
    critical_surface_intensity / (300.0 * surface_fuel_consumption)
}

/// Calculate crown fraction burned (CFB)
///
/// CFB = 1 - exp(-0.23 × (ROS - RSO)), zero when ROS does not exceed RSO
///
/// # Returns
/// Crown fraction burned (0-1)
pub fn crown_fraction_burned(rate_of_spread: f64, critical_spread_rate: f64) -> f64 {
    if rate_of_spread <= critical_spread_rate {
        return 0.0;
    }
    let cfb = 1.0 - (-0.23 * (rate_of_spread - critical_spread_rate)).exp();
    cfb.clamp(0.0, 1.0)
}

/// CFB for a fuel and spread rate; always zero for fuels without a crown layer
pub(crate) fn fuel_crown_fraction_burned(
    can_crown: bool,
    rate_of_spread: f64,
    foliar_moisture_content: f64,
    crown_base_height: f64,
    surface_fuel_consumption: f64,
) -> f64 {
    if !can_crown {
        return 0.0;
    }
    let csi = critical_surface_intensity(foliar_moisture_content, crown_base_height);
    crown_fraction_burned(
        rate_of_spread,
        critical_spread_rate(csi, surface_fuel_consumption),
    )
}
