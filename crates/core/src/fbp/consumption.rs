//! Surface and total fuel consumption
//!
//! # References
//! Forestry Canada Fire Danger Group (1992), ST-X-3, Eq. 9-25 and 66

use crate::config::EngineConfig;
use crate::core_types::fuel::{FuelType, ResolvedFuel};
use crate::error::{check_range, Result};

/// Floor applied to SFC so the critical spread rate stays finite
pub const MIN_SURFACE_FUEL_CONSUMPTION: f64 = 1e-6;

fn conifer_duff(bui: f64) -> f64 {
    5.0 * (1.0 - (-0.0115 * bui).exp())
}

fn deciduous_litter(bui: f64) -> f64 {
    1.5 * (1.0 - (-0.0183 * bui).exp())
}

pub(crate) fn sfc_raw(fuel: &ResolvedFuel, bui: f64, ffmc: f64, grass_fuel_load: f64) -> f64 {
    let sfc = match fuel.fuel_type {
        FuelType::C1 => {
            // Spruce-lichen consumption is driven by the fine fuels
            if ffmc > 84.0 {
                0.75 + 0.75 * (1.0 - (-0.23 * (ffmc - 84.0)).exp()).sqrt()
            } else {
                0.75 - 0.75 * (1.0 - (0.23 * (ffmc - 84.0)).exp()).sqrt()
            }
        }
        FuelType::C2 | FuelType::M3 | FuelType::M4 => conifer_duff(bui),
        FuelType::C3 | FuelType::C4 => 5.0 * (1.0 - (-0.0164 * bui).exp()).powf(2.24),
        FuelType::C5 | FuelType::C6 => 5.0 * (1.0 - (-0.0149 * bui).exp()).powf(2.48),
        FuelType::C7 => {
            let forest_floor = (2.0 * (1.0 - (-0.104 * (ffmc - 70.0)).exp())).max(0.0);
            let woody = 1.5 * (1.0 - (-0.0201 * bui).exp());
            forest_floor + woody
        }
        FuelType::D1 | FuelType::D2 => deciduous_litter(bui),
        FuelType::M1 | FuelType::M2 => {
            let pc = fuel.parameters.percent_conifer / 100.0;
            pc * conifer_duff(bui) + (1.0 - pc) * deciduous_litter(bui)
        }
        FuelType::O1a | FuelType::O1b => grass_fuel_load,
        FuelType::S1 => 4.0 * (1.0 - (-0.025 * bui).exp()) + 4.0 * (1.0 - (-0.034 * bui).exp()),
        FuelType::S2 => 10.0 * (1.0 - (-0.013 * bui).exp()) + 6.0 * (1.0 - (-0.060 * bui).exp()),
        FuelType::S3 => {
            12.0 * (1.0 - (-0.0166 * bui).exp()) + 20.0 * (1.0 - (-0.0210 * bui).exp())
        }
    };
    sfc.max(MIN_SURFACE_FUEL_CONSUMPTION)
}

/// Surface fuel consumption (kg/m²)
///
/// O1 fuels consume the configured grass fuel load regardless of BUI.
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for BUI < 0 or FFMC outside 0-101.
pub fn surface_fuel_consumption(
    fuel: &ResolvedFuel,
    bui: f64,
    ffmc: f64,
    config: &EngineConfig,
) -> Result<f64> {
    let bui = check_range("bui", bui, 0.0, f64::INFINITY, ">= 0")?;
    let ffmc = check_range("ffmc", ffmc, 0.0, crate::fwi::FFMC_MAX, "0-101")?;
    Ok(sfc_raw(fuel, bui, ffmc, config.grass_fuel_load))
}

/// Crown fuel consumption (kg/m²), CFC = CFL × CFB
///
/// Mixedwoods only crown in their conifer or dead fir share.
pub fn crown_fuel_consumption(fuel: &ResolvedFuel, crown_fraction_burned: f64) -> f64 {
    let cfc = fuel.fuel_type.crown_fuel_load() * crown_fraction_burned;
    match fuel.fuel_type {
        FuelType::M1 | FuelType::M2 => cfc * fuel.parameters.percent_conifer / 100.0,
        FuelType::M3 | FuelType::M4 => cfc * fuel.parameters.percent_dead_balsam_fir / 100.0,
        _ => cfc,
    }
}

/// Total fuel consumption, TFC = SFC + CFC
pub fn total_fuel_consumption(
    fuel: &ResolvedFuel,
    surface_fuel_consumption: f64,
    crown_fraction_burned: f64,
) -> f64 {
    surface_fuel_consumption + crown_fuel_consumption(fuel, crown_fraction_burned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::fuel::StationFuelOverrides;
    use approx::assert_relative_eq;

    fn fuel(fuel_type: FuelType) -> ResolvedFuel {
        ResolvedFuel::resolve(
            fuel_type,
            &StationFuelOverrides {
                grass_cure: Some(80.0),
                ..StationFuelOverrides::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_c1_depends_on_ffmc() {
        let config = EngineConfig::default();
        let c1 = fuel(FuelType::C1);
        let dry = surface_fuel_consumption(&c1, 50.0, 90.0, &config).unwrap();
        let damp = surface_fuel_consumption(&c1, 50.0, 80.0, &config).unwrap();
        assert_relative_eq!(dry, 1.39884, max_relative = 1e-4);
        assert_relative_eq!(damp, 0.16834, max_relative = 1e-3);
    }

    #[test]
    fn test_grass_uses_configured_load() {
        let mut config = EngineConfig::default();
        let grass = fuel(FuelType::O1a);
        assert_eq!(surface_fuel_consumption(&grass, 80.0, 90.0, &config).unwrap(), 3.5);
        config.grass_fuel_load = 0.35;
        assert_eq!(surface_fuel_consumption(&grass, 80.0, 90.0, &config).unwrap(), 0.35);
    }

    #[test]
    fn test_zero_bui_hits_floor() {
        let config = EngineConfig::default();
        let sfc = surface_fuel_consumption(&fuel(FuelType::C2), 0.0, 90.0, &config).unwrap();
        assert_eq!(sfc, MIN_SURFACE_FUEL_CONSUMPTION);
    }

    #[test]
    fn test_c2_reference_value() {
        let config = EngineConfig::default();
        let sfc = surface_fuel_consumption(&fuel(FuelType::C2), 50.0, 90.0, &config).unwrap();
        assert_relative_eq!(sfc, 2.18648, max_relative = 1e-5);
    }

    #[test]
    fn test_mixedwood_crown_consumption_scaled() {
        assert_relative_eq!(crown_fuel_consumption(&fuel(FuelType::M1), 1.0), 0.4);
        assert_relative_eq!(crown_fuel_consumption(&fuel(FuelType::M3), 0.5), 0.24);
        assert_relative_eq!(crown_fuel_consumption(&fuel(FuelType::C6), 1.0), 1.8);
        assert_eq!(crown_fuel_consumption(&fuel(FuelType::S2), 1.0), 0.0);
        assert_relative_eq!(total_fuel_consumption(&fuel(FuelType::C2), 2.0, 0.5), 2.4);
    }

    #[test]
    fn test_domain_errors() {
        let config = EngineConfig::default();
        assert!(surface_fuel_consumption(&fuel(FuelType::C3), -1.0, 90.0, &config).is_err());
        assert!(surface_fuel_consumption(&fuel(FuelType::C3), 40.0, 102.0, &config).is_err());
    }
}
