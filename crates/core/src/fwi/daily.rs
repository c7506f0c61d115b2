//! One station-day of the FWI System, and a season run over consecutive days

use tracing::debug;

use super::moisture_codes::{dc_raw, dmc_raw, ffmc_raw};
use super::spread_indices::{bui_raw, fwi_raw, isi_raw};
use crate::core_types::{FireIndices, MoistureCodes, WeatherObservation};
use crate::error::{check_range, Result};

/// Compute all six indices for one station-day
///
/// `previous` is yesterday's moisture codes; `None` starts the season from
/// [`MoistureCodes::SEASON_START`].
///
/// # Errors
/// [`crate::AdvisoryError::Parameter`] when a required weather field is
/// missing, [`crate::AdvisoryError::NumericDomain`] when any input is out of range.
pub fn calculate_daily_indices(
    previous: Option<MoistureCodes>,
    observation: &WeatherObservation,
    latitude: f64,
) -> Result<FireIndices> {
    let previous = previous.unwrap_or_default();
    check_range("ffmc_yda", previous.ffmc, 0.0, 101.0, "0-101")?;
    check_range("dmc_yda", previous.dmc, 0.0, f64::INFINITY, ">= 0")?;
    check_range("dc_yda", previous.dc, 0.0, f64::INFINITY, ">= 0")?;
    let latitude = check_range("latitude", latitude, -90.0, 90.0, "-90..90")?;
    let weather = observation.noon_weather()?;

    let ffmc = ffmc_raw(previous.ffmc, &weather);
    let dmc = dmc_raw(previous.dmc, &weather, latitude);
    let dc = dc_raw(previous.dc, &weather, latitude);
    let isi = isi_raw(ffmc, weather.wind_speed);
    let bui = bui_raw(dmc, dc);
    let fwi = fwi_raw(isi, bui);

    debug!(
        station = observation.station_code,
        ffmc, dmc, dc, isi, bui, fwi, "calculated daily indices"
    );

    Ok(FireIndices {
        ffmc,
        dmc,
        dc,
        isi,
        bui,
        fwi,
    })
}

/// Run consecutive daily observations through the index recursion
///
/// Observations must already be in date order for a single station. The
/// first day starts from `start` (or season start-up values).
///
/// # Errors
/// Fails on the first day whose inputs are missing or invalid; no partial
/// season is returned.
pub fn calculate_season(
    start: Option<MoistureCodes>,
    observations: &[WeatherObservation],
    latitude: f64,
) -> Result<Vec<FireIndices>> {
    let mut previous = start;
    let mut season = Vec::with_capacity(observations.len());
    for observation in observations {
        let indices = calculate_daily_indices(previous, observation, latitude)?;
        previous = Some(indices.moisture_codes());
        season.push(indices);
    }
    Ok(season)
}
