//! Head and back rate of spread by fuel family
//!
//! Each [`FuelFamily`] owns one spread strategy. All of them start from the
//! same saturating ISI curve `a × (1 - e^(-b × ISI))^c` with per-fuel
//! coefficients, then scale by the buildup effect. C6 additionally blends a
//! surface and a crown spread rate through its own crown fraction burned.
//!
//! # References
//! Forestry Canada Fire Danger Group (1992), ST-X-3, Eq. 26-45, 54, 60-64

use serde::{Deserialize, Serialize};

use super::crown_fire::{
    critical_spread_rate, critical_surface_intensity, crown_fraction_burned,
    fuel_crown_fraction_burned,
};
use crate::core_types::fuel::{FuelFamily, FuelType, ResolvedFuel};
use crate::error::{check_non_negative, check_range, required, Result};

/// Rate of spread model coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SpreadCoefficients {
    const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Initial rate of spread (m/min), before the buildup effect
    pub fn initial_spread(self, isi: f64) -> f64 {
        self.a * (1.0 - (-self.b * isi).exp()).powf(self.c)
    }
}

const C2_COEFFICIENTS: SpreadCoefficients = SpreadCoefficients::new(110.0, 0.0282, 1.5);
const D1_COEFFICIENTS: SpreadCoefficients = SpreadCoefficients::new(30.0, 0.0232, 1.6);
const M3_COEFFICIENTS: SpreadCoefficients = SpreadCoefficients::new(120.0, 0.0572, 1.4);
const M4_COEFFICIENTS: SpreadCoefficients = SpreadCoefficients::new(100.0, 0.0404, 1.48);

/// Green-up reduction applied to the deciduous component (D2, M2, M4)
const GREEN_DECIDUOUS_FACTOR: f64 = 0.2;

/// Spread coefficients of a fuel type
///
/// Mixedwoods and D2 borrow the curves of their components, so the value
/// returned for them is the curve of their conifer (or dead fir) part.
pub const fn spread_coefficients(fuel_type: FuelType) -> SpreadCoefficients {
    match fuel_type {
        FuelType::C1 => SpreadCoefficients::new(90.0, 0.0649, 4.5),
        FuelType::C2 | FuelType::M1 | FuelType::M2 => C2_COEFFICIENTS,
        FuelType::C3 => SpreadCoefficients::new(110.0, 0.0444, 3.0),
        FuelType::C4 => SpreadCoefficients::new(110.0, 0.0293, 1.5),
        FuelType::C5 => SpreadCoefficients::new(30.0, 0.0697, 4.0),
        FuelType::C6 => SpreadCoefficients::new(30.0, 0.0800, 3.0),
        FuelType::C7 => SpreadCoefficients::new(45.0, 0.0305, 2.0),
        FuelType::D1 | FuelType::D2 => D1_COEFFICIENTS,
        FuelType::M3 => M3_COEFFICIENTS,
        FuelType::M4 => M4_COEFFICIENTS,
        FuelType::O1a => SpreadCoefficients::new(190.0, 0.0310, 1.4),
        FuelType::O1b => SpreadCoefficients::new(250.0, 0.0350, 1.7),
        FuelType::S1 => SpreadCoefficients::new(75.0, 0.0297, 1.3),
        FuelType::S2 => SpreadCoefficients::new(40.0, 0.0438, 1.7),
        FuelType::S3 => SpreadCoefficients::new(55.0, 0.0829, 3.2),
    }
}

/// Average BUI (BUIo) and proportion of maximum spread at BUIo (q)
pub const fn buildup_parameters(fuel_type: FuelType) -> (f64, f64) {
    match fuel_type {
        FuelType::C1 => (72.0, 0.9),
        FuelType::C2 => (64.0, 0.7),
        FuelType::C3 => (62.0, 0.75),
        FuelType::C4 => (66.0, 0.8),
        FuelType::C5 => (56.0, 0.8),
        FuelType::C6 => (62.0, 0.8),
        FuelType::C7 => (106.0, 0.85),
        FuelType::D1 | FuelType::D2 => (32.0, 0.9),
        FuelType::M1 | FuelType::M2 | FuelType::M3 | FuelType::M4 => (50.0, 0.8),
        FuelType::O1a | FuelType::O1b => (1.0, 1.0),
        FuelType::S1 => (38.0, 0.75),
        FuelType::S2 => (63.0, 0.75),
        FuelType::S3 => (31.0, 0.75),
    }
}

/// Buildup effect on spread, BE = exp(50 × ln(q) × (1/BUI - 1/BUIo))
///
/// BUI of zero yields no adjustment.
pub fn buildup_effect(fuel_type: FuelType, bui: f64) -> f64 {
    let (bui0, q) = buildup_parameters(fuel_type);
    if bui > 0.0 && bui0 > 0.0 {
        (50.0 * q.ln() * (1.0 / bui - 1.0 / bui0)).exp()
    } else {
        1.0
    }
}

/// Grass curing factor
pub fn curing_factor(grass_cure: f64) -> f64 {
    if grass_cure < 58.8 {
        0.005 * ((0.061 * grass_cure).exp() - 1.0)
    } else {
        0.176 + 0.02 * (grass_cure - 58.8)
    }
}

/// Inputs shared by every family strategy
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpreadInputs {
    pub isi: f64,
    pub bui: f64,
    pub fmc: f64,
    pub sfc: f64,
}

/// Head spread with the crown fraction its strategy already determined
///
/// Only C6 fixes its own CFB (from the surface spread rate); every other
/// fuel leaves it to the caller.
#[derive(Debug, Clone, Copy)]
struct HeadSpread {
    pub ros: f64,
    pub crown_fraction_burned: Option<f64>,
}

impl HeadSpread {
    const fn surface(ros: f64) -> Self {
        Self {
            ros,
            crown_fraction_burned: None,
        }
    }
}

fn conifer_spread(fuel: &ResolvedFuel, inputs: SpreadInputs) -> HeadSpread {
    let surface = spread_coefficients(fuel.fuel_type).initial_spread(inputs.isi)
        * buildup_effect(fuel.fuel_type, inputs.bui);
    if fuel.fuel_type != FuelType::C6 {
        return HeadSpread::surface(surface);
    }

    // Plantation: blend surface and crown spread by the surface fire's CFB
    let fme = 1000.0 * (1.5 - 0.00275 * inputs.fmc).powi(4) / (460.0 + 25.9 * inputs.fmc);
    let crown = 60.0 * (1.0 - (-0.0497 * inputs.isi).exp()) * fme / 0.778;
    let csi = critical_surface_intensity(inputs.fmc, fuel.parameters.crown_base_height);
    let cfb = crown_fraction_burned(surface, critical_spread_rate(csi, inputs.sfc));
    HeadSpread {
        ros: surface + cfb * (crown - surface),
        crown_fraction_burned: Some(cfb),
    }
}

fn deciduous_spread(fuel: &ResolvedFuel, inputs: SpreadInputs) -> f64 {
    let leafless = D1_COEFFICIENTS.initial_spread(inputs.isi);
    let rsi = match fuel.fuel_type {
        FuelType::D2 => GREEN_DECIDUOUS_FACTOR * leafless,
        _ => leafless,
    };
    rsi * buildup_effect(fuel.fuel_type, inputs.bui)
}

fn mixedwood_spread(fuel: &ResolvedFuel, inputs: SpreadInputs) -> f64 {
    let deciduous = D1_COEFFICIENTS.initial_spread(inputs.isi);
    let pc = fuel.parameters.percent_conifer / 100.0;
    let pdf = fuel.parameters.percent_dead_balsam_fir / 100.0;
    let rsi = match fuel.fuel_type {
        FuelType::M1 => pc * C2_COEFFICIENTS.initial_spread(inputs.isi) + (1.0 - pc) * deciduous,
        FuelType::M2 => {
            pc * C2_COEFFICIENTS.initial_spread(inputs.isi)
                + GREEN_DECIDUOUS_FACTOR * (1.0 - pc) * deciduous
        }
        FuelType::M3 => pdf * M3_COEFFICIENTS.initial_spread(inputs.isi) + (1.0 - pdf) * deciduous,
        _ => {
            pdf * M4_COEFFICIENTS.initial_spread(inputs.isi)
                + GREEN_DECIDUOUS_FACTOR * (1.0 - pdf) * deciduous
        }
    };
    rsi * buildup_effect(fuel.fuel_type, inputs.bui)
}

fn grass_spread(fuel: &ResolvedFuel, inputs: SpreadInputs, grass_cure: f64) -> f64 {
    spread_coefficients(fuel.fuel_type).initial_spread(inputs.isi) * curing_factor(grass_cure)
}

fn slash_spread(fuel: &ResolvedFuel, inputs: SpreadInputs) -> f64 {
    spread_coefficients(fuel.fuel_type).initial_spread(inputs.isi)
        * buildup_effect(fuel.fuel_type, inputs.bui)
}

/// Head fire rate of spread (m/min) with its crown fraction burned (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadFireSpread {
    pub rate_of_spread: f64,
    pub crown_fraction_burned: f64,
}

/// Dispatch to the family strategy on already validated inputs
fn head_spread(fuel: &ResolvedFuel, inputs: SpreadInputs) -> Result<HeadSpread> {
    let spread = match fuel.fuel_type.family() {
        FuelFamily::Conifer => conifer_spread(fuel, inputs),
        FuelFamily::Deciduous => HeadSpread::surface(deciduous_spread(fuel, inputs)),
        FuelFamily::Mixedwood => HeadSpread::surface(mixedwood_spread(fuel, inputs)),
        FuelFamily::Grass => {
            let cure = required(fuel.grass_cure, "grass_cure")?;
            HeadSpread::surface(grass_spread(fuel, inputs, cure))
        }
        FuelFamily::Slash => HeadSpread::surface(slash_spread(fuel, inputs)),
    };
    Ok(HeadSpread {
        ros: spread.ros.max(0.0),
        ..spread
    })
}

pub(crate) fn ros_raw(fuel: &ResolvedFuel, inputs: SpreadInputs) -> Result<f64> {
    Ok(head_spread(fuel, inputs)?.ros)
}

pub(crate) fn head_fire_spread_raw(
    fuel: &ResolvedFuel,
    inputs: SpreadInputs,
) -> Result<HeadFireSpread> {
    let spread = head_spread(fuel, inputs)?;
    // C6 crowning follows its surface spread, not the blended head spread
    let crown_fraction_burned = spread.crown_fraction_burned.unwrap_or_else(|| {
        fuel_crown_fraction_burned(
            fuel.fuel_type.can_crown(),
            spread.ros,
            inputs.fmc,
            fuel.parameters.crown_base_height,
            inputs.sfc,
        )
    });
    Ok(HeadFireSpread {
        rate_of_spread: spread.ros,
        crown_fraction_burned,
    })
}

fn spread_inputs(
    isi: Option<f64>,
    bui: Option<f64>,
    fmc: Option<f64>,
    sfc: Option<f64>,
) -> Result<SpreadInputs> {
    Ok(SpreadInputs {
        isi: check_non_negative("isi", required(isi, "isi")?)?,
        bui: check_non_negative("bui", required(bui, "bui")?)?,
        fmc: check_range("fmc", required(fmc, "fmc")?, 0.0, 300.0, "0-300 %")?,
        sfc: check_non_negative("sfc", required(sfc, "sfc")?)?,
    })
}

/// Head fire rate of spread (m/min)
///
/// Every input is required for every fuel type so that a caller cannot get
/// a silently different answer by omitting a value the family ignores.
///
/// # Errors
/// [`crate::AdvisoryError::Parameter`] naming the first missing input, or
/// [`crate::AdvisoryError::NumericDomain`] for negative or non-finite values.
pub fn rate_of_spread(
    fuel: &ResolvedFuel,
    isi: Option<f64>,
    bui: Option<f64>,
    fmc: Option<f64>,
    sfc: Option<f64>,
) -> Result<f64> {
    ros_raw(fuel, spread_inputs(isi, bui, fmc, sfc)?)
}

/// Head fire rate of spread together with the crown fraction burned
///
/// Fuels that cannot crown report a CFB of zero.
///
/// # Errors
/// See [`rate_of_spread`].
pub fn head_fire_spread(
    fuel: &ResolvedFuel,
    isi: Option<f64>,
    bui: Option<f64>,
    fmc: Option<f64>,
    sfc: Option<f64>,
) -> Result<HeadFireSpread> {
    head_fire_spread_raw(fuel, spread_inputs(isi, bui, fmc, sfc)?)
}

/// Back fire rate of spread (m/min), the head model driven by the back ISI
///
/// # Errors
/// See [`rate_of_spread`].
pub fn back_rate_of_spread(
    fuel: &ResolvedFuel,
    ffmc: f64,
    wind_speed: f64,
    bui: f64,
    fmc: f64,
    sfc: f64,
) -> Result<f64> {
    let ffmc = check_range("ffmc", ffmc, 0.0, crate::fwi::FFMC_MAX, "0-101")?;
    let wind_speed = check_non_negative("wind_speed", wind_speed)?;
    let back_isi = crate::fwi::back_isi_raw(ffmc, wind_speed);
    rate_of_spread(fuel, Some(back_isi), Some(bui), Some(fmc), Some(sfc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::fuel::StationFuelOverrides;
    use crate::error::AdvisoryError;
    use approx::assert_relative_eq;

    fn table(fuel_type: FuelType) -> ResolvedFuel {
        ResolvedFuel::from_table(fuel_type).unwrap()
    }

    fn grass(fuel_type: FuelType, cure: f64) -> ResolvedFuel {
        ResolvedFuel::resolve(
            fuel_type,
            &StationFuelOverrides {
                grass_cure: Some(cure),
                ..StationFuelOverrides::default()
            },
        )
        .unwrap()
    }

    fn ros(fuel: &ResolvedFuel, isi: f64, bui: f64, fmc: f64, sfc: f64) -> f64 {
        rate_of_spread(fuel, Some(isi), Some(bui), Some(fmc), Some(sfc)).unwrap()
    }

    #[test]
    fn test_c7_reference() {
        let c7 = ros(&table(FuelType::C7), 10.0, 50.0, 95.0, 1.2);
        assert_relative_eq!(c7, 2.85383, max_relative = 1e-4);
    }

    #[test]
    fn test_c2_reference() {
        let c2 = ros(&table(FuelType::C2), 10.0, 50.0, 95.0, 2.18648);
        assert_relative_eq!(c2, 12.39325, max_relative = 1e-4);
    }

    #[test]
    fn test_c6_crown_blend() {
        let c6 = ros(&table(FuelType::C6), 15.0, 80.0, 95.0, 2.03816);
        assert_relative_eq!(c6, 26.98204, max_relative = 1e-4);
        let surface_only = spread_coefficients(FuelType::C6).initial_spread(15.0)
            * buildup_effect(FuelType::C6, 80.0);
        assert!(c6 > surface_only);
    }

    #[test]
    fn test_c6_crown_fraction_from_surface_spread() {
        let isi = crate::fwi::isi_raw(92.0, 20.0);
        let spread = |fuel_type, sfc| {
            head_fire_spread(&table(fuel_type), Some(isi), Some(80.0), Some(120.0), Some(sfc))
                .unwrap()
        };
        let c6 = spread(FuelType::C6, 2.03816);
        assert_relative_eq!(c6.rate_of_spread, 18.43952, max_relative = 1e-4);
        // Surface spread 11.337 m/min against a critical 6.455 m/min
        assert_relative_eq!(c6.crown_fraction_burned, 0.67466, max_relative = 1e-4);
        assert_eq!(spread(FuelType::D1, 1.0).crown_fraction_burned, 0.0);
    }

    #[test]
    fn test_deciduous_green_up() {
        let d1 = ros(&table(FuelType::D1), 10.0, 40.0, 100.0, 1.0);
        let d2 = ros(&table(FuelType::D2), 10.0, 40.0, 100.0, 1.0);
        assert_relative_eq!(d1, 2.49548, max_relative = 1e-4);
        assert_relative_eq!(d2, 0.2 * d1, max_relative = 1e-12);
    }

    #[test]
    fn test_mixedwood_reference() {
        let m1 = ros(&table(FuelType::M1), 10.0, 60.0, 100.0, 1.0);
        assert_relative_eq!(m1, 8.20639, max_relative = 1e-4);
        let m2 = ros(&table(FuelType::M2), 10.0, 60.0, 100.0, 1.0);
        assert!(m2 < m1);
    }

    #[test]
    fn test_grass_curing() {
        let isi = crate::fwi::isi_raw(90.0, 20.0);
        let o1b = ros(&grass(FuelType::O1b, 60.0), isi, 50.0, 95.0, 3.5);
        assert_relative_eq!(o1b, 7.87208, max_relative = 1e-4);
        assert!(curing_factor(30.0) < curing_factor(58.8));
        assert!(ros(&grass(FuelType::O1a, 0.0), isi, 50.0, 95.0, 3.5) < 1e-9);
    }

    #[test]
    fn test_buildup_effect() {
        assert_relative_eq!(buildup_effect(FuelType::C2, 64.0), 1.0);
        assert!(buildup_effect(FuelType::C2, 30.0) < 1.0);
        assert!(buildup_effect(FuelType::C2, 120.0) > 1.0);
        assert_eq!(buildup_effect(FuelType::C2, 0.0), 1.0);
        assert_eq!(buildup_effect(FuelType::O1b, 200.0), 1.0);
    }

    #[test]
    fn test_missing_isi_is_parameter_error() {
        let c7 = table(FuelType::C7);
        let result = rate_of_spread(&c7, None, Some(50.0), Some(95.0), Some(1.2));
        assert_eq!(result, Err(AdvisoryError::Parameter { name: "isi" }));
        let d1 = table(FuelType::D1);
        let result = rate_of_spread(&d1, Some(5.0), Some(50.0), None, Some(1.2));
        assert_eq!(result, Err(AdvisoryError::Parameter { name: "fmc" }));
    }

    #[test]
    fn test_back_spread_is_slower() {
        let fuel = table(FuelType::C3);
        let head = ros(&fuel, crate::fwi::isi_raw(92.0, 25.0), 80.0, 100.0, 3.0);
        let back = back_rate_of_spread(&fuel, 92.0, 25.0, 80.0, 100.0, 3.0).unwrap();
        assert!(back < head);
        assert!(back >= 0.0);
    }
}
