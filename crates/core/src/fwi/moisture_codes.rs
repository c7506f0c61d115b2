//! Van Wagner (1987) fuel moisture codes
//!
//! The three moisture codes are day-to-day bookkeeping of fuel moisture in
//! three fuel layers with very different drying rates:
//! - FFMC: litter and fine fuels (timelag ~2/3 day)
//! - DMC: loosely compacted duff (timelag ~12 days)
//! - DC: deep compact organic layers (timelag ~52 days)
//!
//! # Scientific References
//! - Van Wagner, C.E. (1987). "Development and structure of the Canadian
//!   Forest Fire Weather Index System". Forestry Technical Report 35
//! - Van Wagner, C.E., Pickett, T.L. (1985). "Equations and FORTRAN program
//!   for the Canadian Forest Fire Weather Index System". Forestry Technical
//!   Report 33
//! - Lawson, B.D., Armitage, O.B. (2008). "Weather guide for the Canadian
//!   Forest Fire Danger Rating System" (latitude day-length adjustments)

use crate::core_types::NoonWeather;
use crate::error::{check_range, Result};

/// Upper bound of the FFMC scale
pub const FFMC_MAX: f64 = 101.0;

/// FFMC scale factor relating code to moisture content
const FFMC_COEFFICIENT: f64 = 147.2;

/// DMC effective day-length factors (hours), latitude > 30°N
const DMC_DAY_LENGTH_NORTH: [f64; 12] = [6.5, 7.5, 9.0, 12.8, 13.9, 13.9, 12.4, 10.9, 9.4, 8.0, 7.0, 6.0];
/// DMC day-length factors, 10°N < latitude <= 30°N
const DMC_DAY_LENGTH_NORTH_TROPICS: [f64; 12] = [7.9, 8.4, 8.9, 9.5, 9.9, 10.2, 10.1, 9.7, 9.1, 8.6, 8.1, 7.8];
/// DMC day-length factors, 30°S < latitude <= 10°S
const DMC_DAY_LENGTH_SOUTH_TROPICS: [f64; 12] = [10.1, 9.6, 9.1, 8.5, 8.1, 7.8, 7.9, 8.3, 8.9, 9.4, 9.9, 10.2];
/// DMC day-length factors, latitude <= 30°S
const DMC_DAY_LENGTH_SOUTH: [f64; 12] = [11.5, 10.5, 9.2, 7.9, 6.8, 6.2, 6.5, 7.4, 8.7, 10.0, 11.2, 11.8];

/// DC day-length adjustment, latitude > 20°N
const DC_DAY_LENGTH_NORTH: [f64; 12] = [-1.6, -1.6, -1.6, 0.9, 3.8, 5.8, 6.4, 5.0, 2.4, 0.4, -1.6, -1.6];
/// DC day-length adjustment, latitude <= 20°S
const DC_DAY_LENGTH_SOUTH: [f64; 12] = [6.4, 5.0, 2.4, 0.4, -1.6, -1.6, -1.6, -1.6, -1.6, 0.9, 3.8, 5.8];

/// Convert FFMC to fine fuel moisture content (%)
#[inline]
pub(crate) fn ffmc_to_moisture(ffmc: f64) -> f64 {
    FFMC_COEFFICIENT * (101.0 - ffmc) / (59.5 + ffmc)
}

/// Convert fine fuel moisture content (%) back to FFMC
#[inline]
fn moisture_to_ffmc(moisture: f64) -> f64 {
    59.5 * (250.0 - moisture) / (FFMC_COEFFICIENT + moisture)
}

fn dmc_day_length(latitude: f64, month: u32) -> f64 {
    let i = (month - 1) as usize;
    if latitude > 30.0 {
        DMC_DAY_LENGTH_NORTH[i]
    } else if latitude > 10.0 {
        DMC_DAY_LENGTH_NORTH_TROPICS[i]
    } else if latitude > -10.0 {
        9.0
    } else if latitude > -30.0 {
        DMC_DAY_LENGTH_SOUTH_TROPICS[i]
    } else {
        DMC_DAY_LENGTH_SOUTH[i]
    }
}

fn dc_day_length(latitude: f64, month: u32) -> f64 {
    let i = (month - 1) as usize;
    if latitude > 20.0 {
        DC_DAY_LENGTH_NORTH[i]
    } else if latitude <= -20.0 {
        DC_DAY_LENGTH_SOUTH[i]
    } else {
        1.4
    }
}

/// Fine Fuel Moisture Code
///
/// Rain above 0.5 mm wets the fuel (with an extra term once moisture exceeds
/// 150%), then the fuel dries toward the drying equilibrium `ed` or wets
/// toward the wetting equilibrium `ew` at a rate set by humidity, wind and
/// temperature. Results are clamped to [0, 101].
///
/// # Arguments
/// * `ffmc_yda` - Yesterday's FFMC
/// * `weather` - Today's noon weather
///
/// # References
/// Van Wagner (1987), Equations 1-10
pub(crate) fn ffmc_raw(ffmc_yda: f64, weather: &NoonWeather) -> f64 {
    let NoonWeather {
        temperature: temp,
        relative_humidity: rh,
        wind_speed: ws,
        precipitation: prec,
        ..
    } = *weather;

    let mut mo = ffmc_to_moisture(ffmc_yda);

    if prec > 0.5 {
        let rf = prec - 0.5;
        let wetting = 42.5 * rf * (-100.0 / (251.0 - mo)).exp() * (1.0 - (-6.93 / rf).exp());
        mo += if mo > 150.0 {
            wetting + 0.0015 * (mo - 150.0).powi(2) * rf.sqrt()
        } else {
            wetting
        };
        mo = mo.min(250.0);
    }

    // Equilibrium moisture contents for drying and wetting
    let humidity_term = 0.18 * (21.1 - temp) * (1.0 - 1.0 / (0.115 * rh).exp());
    let ed = 0.942 * rh.powf(0.679) + 11.0 * ((rh - 100.0) / 10.0).exp() + humidity_term;
    let ew = 0.618 * rh.powf(0.753) + 10.0 * ((rh - 100.0) / 10.0).exp() + humidity_term;

    let m = if mo > ed {
        let ko = 0.424 * (1.0 - (rh / 100.0).powf(1.7))
            + 0.0694 * ws.sqrt() * (1.0 - (rh / 100.0).powi(8));
        let kd = ko * 0.581 * (0.0365 * temp).exp();
        ed + (mo - ed) / 10f64.powf(kd)
    } else if mo < ew {
        let kl = 0.424 * (1.0 - ((100.0 - rh) / 100.0).powf(1.7))
            + 0.0694 * ws.sqrt() * (1.0 - ((100.0 - rh) / 100.0).powi(8));
        let kw = kl * 0.581 * (0.0365 * temp).exp();
        ew - (ew - mo) / 10f64.powf(kw)
    } else {
        mo
    };

    moisture_to_ffmc(m).clamp(0.0, FFMC_MAX)
}

/// Duff Moisture Code
///
/// Drying is driven by temperature (floored at -1.1 °C), humidity and an
/// effective day length that depends on latitude band and month. Rain above
/// 1.5 mm rewets the duff.
///
/// # References
/// Van Wagner (1987), Equations 11-17
pub(crate) fn dmc_raw(dmc_yda: f64, weather: &NoonWeather, latitude: f64) -> f64 {
    let temp = weather.temperature.max(-1.1);
    let rk = 1.894
        * (temp + 1.1)
        * (100.0 - weather.relative_humidity)
        * dmc_day_length(latitude, weather.month)
        * 1e-4;

    let pr = if weather.precipitation > 1.5 {
        let rw = 0.92 * weather.precipitation - 1.27;
        let wmi = 20.0 + 280.0 / (0.023 * dmc_yda).exp();
        let b = if dmc_yda <= 33.0 {
            100.0 / (0.5 + 0.3 * dmc_yda)
        } else if dmc_yda <= 65.0 {
            14.0 - 1.3 * dmc_yda.ln()
        } else {
            6.2 * dmc_yda.ln() - 17.2
        };
        let wmr = wmi + 1000.0 * rw / (48.77 + b * rw);
        43.43 * (5.6348 - (wmr - 20.0).ln())
    } else {
        dmc_yda
    };

    (pr.max(0.0) + rk).max(0.0)
}

/// Drought Code
///
/// # References
/// Van Wagner (1987), Equations 18-23
pub(crate) fn dc_raw(dc_yda: f64, weather: &NoonWeather, latitude: f64) -> f64 {
    let temp = weather.temperature.max(-2.8);
    let pe = ((0.36 * (temp + 2.8) + dc_day_length(latitude, weather.month)) / 2.0).max(0.0);

    let dr = if weather.precipitation > 2.8 {
        let rw = 0.83 * weather.precipitation - 1.27;
        let smi = 800.0 * (-dc_yda / 400.0).exp();
        (dc_yda - 400.0 * (1.0 + 3.937 * rw / smi).ln()).max(0.0)
    } else {
        dc_yda
    };

    (dr + pe).max(0.0)
}

/// Today's FFMC from yesterday's FFMC and today's noon weather
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] if `ffmc_yda` is outside 0-101.
pub fn fine_fuel_moisture_code(ffmc_yda: f64, weather: &NoonWeather) -> Result<f64> {
    let ffmc_yda = check_range("ffmc_yda", ffmc_yda, 0.0, FFMC_MAX, "0-101")?;
    Ok(ffmc_raw(ffmc_yda, weather))
}

/// Today's DMC from yesterday's DMC, today's weather and station latitude
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for a negative `dmc_yda` or a latitude
/// outside -90..90.
pub fn duff_moisture_code(dmc_yda: f64, weather: &NoonWeather, latitude: f64) -> Result<f64> {
    let dmc_yda = check_range("dmc_yda", dmc_yda, 0.0, f64::INFINITY, ">= 0")?;
    let latitude = check_range("latitude", latitude, -90.0, 90.0, "-90..90")?;
    Ok(dmc_raw(dmc_yda, weather, latitude))
}

/// Today's DC from yesterday's DC, today's weather and station latitude
///
/// # Errors
/// [`crate::AdvisoryError::NumericDomain`] for a negative `dc_yda` or a latitude
/// outside -90..90.
pub fn drought_code(dc_yda: f64, weather: &NoonWeather, latitude: f64) -> Result<f64> {
    let dc_yda = check_range("dc_yda", dc_yda, 0.0, f64::INFINITY, ">= 0")?;
    let latitude = check_range("latitude", latitude, -90.0, 90.0, "-90..90")?;
    Ok(dc_raw(dc_yda, weather, latitude))
}
