//! Foliar moisture content of conifer needles through the season
//!
//! FMC bottoms out in late spring (the "spring dip") on a date D0 that moves
//! later with latitude and elevation. Around D0 FMC rises quadratically, and
//! from ~50 days away it sits at the summer plateau of 120%.
//!
//! # References
//! Forestry Canada Fire Danger Group (1992), ST-X-3, Eq. 1-9

use crate::error::{check_range, Result};

/// Summer plateau of foliar moisture (%)
pub const FMC_PLATEAU: f64 = 120.0;

/// Day of year of minimum foliar moisture
///
/// Uses the normalized-latitude model; without a positive elevation the
/// sea-level form is used. Longitude is taken as degrees west regardless of sign.
pub fn minimum_fmc_day(latitude: f64, longitude: f64, elevation: Option<f64>) -> f64 {
    let longitude = longitude.abs();
    match elevation {
        Some(elevation) if elevation > 0.0 => {
            let normalized = 33.7 * (-0.0351 * (150.0 - longitude)).exp() + 43.0;
            (142.1 * latitude / normalized + 0.0172 * elevation).round()
        }
        _ => {
            let normalized = 23.4 * (-0.0360 * (150.0 - longitude)).exp() + 46.0;
            (151.0 * latitude / normalized).round()
        }
    }
}

/// FMC as a function of days from the minimum-FMC date
pub(crate) fn fmc_from_day_offset(days_from_minimum: f64) -> f64 {
    let nd = days_from_minimum.abs();
    if nd < 30.0 {
        85.0 + 0.0189 * nd * nd
    } else if nd < 50.0 {
        32.9 + 3.17 * nd - 0.0288 * nd * nd
    } else {
        FMC_PLATEAU
    }
}

/// Foliar moisture content (%)
///
/// # Arguments
/// * `latitude` - Decimal degrees north
/// * `longitude` - Decimal degrees (west, either sign)
/// * `elevation` - Metres above sea level, when known
/// * `day_of_year` - Julian day of the calculation
/// * `min_fmc_day` - Fixed minimum-FMC date, overriding the geographic model
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for coordinates or a day outside range.
pub fn foliar_moisture_content(
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
    day_of_year: u32,
    min_fmc_day: Option<u32>,
) -> Result<f64> {
    let latitude = check_range("latitude", latitude, -90.0, 90.0, "-90..90")?;
    let longitude = check_range("longitude", longitude, -180.0, 180.0, "-180..180")?;
    if let Some(elevation) = elevation {
        check_range("elevation", elevation, -500.0, 9000.0, "-500..9000 m")?;
    }
    check_range("day_of_year", f64::from(day_of_year), 1.0, 366.0, "1-366")?;

    let d0 = match min_fmc_day {
        Some(day) => f64::from(day),
        None => minimum_fmc_day(latitude, longitude, elevation),
    };
    Ok(fmc_from_day_offset(f64::from(day_of_year) - d0))
}
