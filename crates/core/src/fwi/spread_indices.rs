//! Fire behaviour indices of the FWI System
//!
//! ISI combines wind and fine fuel moisture into a spread potential, BUI
//! combines the two slow moisture codes into available fuel, and FWI combines
//! both into a single intensity rating.
//!
//! # Scientific References
//! - Van Wagner (1987), Equations 24-30
//! - Van Wagner (1970). "Conversion of Williams' severity rating for use with
//!   the Fire Weather Index" (Daily Severity Rating)

use super::moisture_codes::{ffmc_to_moisture, FFMC_MAX};
use crate::error::{check_non_negative, check_range, Result};

/// Fine fuel moisture function of the ISI
#[inline]
pub(crate) fn fine_fuel_moisture_function(ffmc: f64) -> f64 {
    let fm = ffmc_to_moisture(ffmc);
    91.9 * (-0.1386 * fm).exp() * (1.0 + fm.powf(5.31) / 49_300_000.0)
}

/// ISI = 0.208 × f(W) × f(F), f(W) = exp(0.05039 × WS)
pub(crate) fn isi_raw(ffmc: f64, wind_speed: f64) -> f64 {
    let f_wind = (0.05039 * wind_speed).exp();
    0.208 * f_wind * fine_fuel_moisture_function(ffmc)
}

/// ISI with the wind function mirrored for the back of the fire
pub(crate) fn back_isi_raw(ffmc: f64, wind_speed: f64) -> f64 {
    let f_wind = (-0.05039 * wind_speed).exp();
    0.208 * f_wind * fine_fuel_moisture_function(ffmc)
}

pub(crate) fn bui_raw(dmc: f64, dc: f64) -> f64 {
    if dmc == 0.0 && dc == 0.0 {
        return 0.0;
    }
    let harmonic = 0.8 * dc * dmc / (dmc + 0.4 * dc);
    if harmonic >= dmc {
        return harmonic;
    }
    // DMC dominates: reduce BUI below DMC in proportion to the harmonic gap
    let p = if dmc == 0.0 { 0.0 } else { (dmc - harmonic) / dmc };
    let cc = 0.92 + (0.0114 * dmc).powf(1.7);
    (dmc - cc * p).max(0.0)
}

pub(crate) fn fwi_raw(isi: f64, bui: f64) -> f64 {
    let bb = if bui > 80.0 {
        0.1 * isi * (1000.0 / (25.0 + 108.64 / (0.023 * bui).exp()))
    } else {
        0.1 * isi * (0.626 * bui.powf(0.809) + 2.0)
    };
    if bb <= 1.0 {
        bb
    } else {
        (2.72 * (0.434 * bb.ln()).powf(0.647)).exp()
    }
}

/// Initial Spread Index from FFMC and 10 m wind speed (km/h)
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for FFMC outside 0-101 or a negative wind speed.
pub fn initial_spread_index(ffmc: f64, wind_speed: f64) -> Result<f64> {
    let ffmc = check_range("ffmc", ffmc, 0.0, FFMC_MAX, "0-101")?;
    let wind_speed = check_non_negative("wind_speed", wind_speed)?;
    Ok(isi_raw(ffmc, wind_speed))
}

/// Buildup Index from DMC and DC
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for negative or non-finite codes.
pub fn buildup_index(dmc: f64, dc: f64) -> Result<f64> {
    let dmc = check_non_negative("dmc", dmc)?;
    let dc = check_non_negative("dc", dc)?;
    Ok(bui_raw(dmc, dc))
}

/// Fire Weather Index from ISI and BUI
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for negative or non-finite indices.
pub fn fire_weather_index(isi: f64, bui: f64) -> Result<f64> {
    let isi = check_non_negative("isi", isi)?;
    let bui = check_non_negative("bui", bui)?;
    Ok(fwi_raw(isi, bui))
}

/// Daily Severity Rating, DSR = 0.0272 × FWI^1.77
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for a negative FWI.
pub fn daily_severity_rating(fwi: f64) -> Result<f64> {
    let fwi = check_non_negative("fwi", fwi)?;
    Ok(0.0272 * fwi.powf(1.77))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_sequence_indices() {
        assert_relative_eq!(initial_spread_index(87.693, 25.0).unwrap(), 10.854, epsilon = 0.005);
        assert_relative_eq!(buildup_index(8.545, 19.014).unwrap(), 8.49, epsilon = 0.005);
        assert_relative_eq!(fire_weather_index(10.854, 8.49).unwrap(), 10.096, epsilon = 0.005);
    }

    #[test]
    fn test_bui_edge_cases() {
        assert_eq!(buildup_index(0.0, 0.0).unwrap(), 0.0);
        // DMC alone still carries some buildup
        assert_relative_eq!(buildup_index(10.0, 0.0).unwrap(), 9.055, epsilon = 0.01);
        assert!(buildup_index(-5.0, 10.0).is_err());
    }

    #[test]
    fn test_back_isi_is_smaller_in_wind() {
        assert!(back_isi_raw(90.0, 20.0) < isi_raw(90.0, 20.0));
        assert_relative_eq!(back_isi_raw(90.0, 0.0), isi_raw(90.0, 0.0));
    }

    #[test]
    fn test_daily_severity_rating() {
        assert_relative_eq!(daily_severity_rating(10.0).unwrap(), 0.0272 * 10f64.powf(1.77));
        assert_eq!(daily_severity_rating(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_fwi_low_isi_is_linear_region() {
        // bb <= 1 returns bb directly
        let fwi = fire_weather_index(0.5, 5.0).unwrap();
        assert!(fwi > 0.0 && fwi <= 1.0);
    }
}
