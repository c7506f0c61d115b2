//! Noon weather observations and the validated view the index calculators use

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::units::{Celsius, Degrees, KilometersPerHour, Millimeters, Percent};
use crate::error::{check_non_negative, check_range, required, Result};

/// One station's noon observation (or forecast) as delivered by ingestion
///
/// Numeric fields are optional at this boundary: upstream feeds routinely
/// drop values and a missing value must surface as an error rather than be
/// replaced with a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub station_code: u32,
    pub observed_at: DateTime<Utc>,
    pub temperature: Option<Celsius>,
    pub relative_humidity: Option<Percent>,
    pub wind_speed: Option<KilometersPerHour>,
    pub wind_direction: Option<Degrees>,
    /// 24 hour accumulated precipitation
    pub precipitation: Option<Millimeters>,
}

/// Weather values with presence and range already checked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoonWeather {
    pub temperature: f64,
    pub relative_humidity: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    /// Calendar month, 1-12
    pub month: u32,
    /// Day of year, 1-366
    pub day_of_year: u32,
}

impl NoonWeather {
    /// Build from raw values
    ///
    /// # Errors
    /// [`crate::AdvisoryError::NumericDomain`] for RH outside 0-100, negative wind or
    /// precipitation, a temperature outside -60..60 °C, or a bad month/day.
    pub fn new(
        temperature: f64,
        relative_humidity: f64,
        wind_speed: f64,
        precipitation: f64,
        month: u32,
        day_of_year: u32,
    ) -> Result<Self> {
        let temperature = check_range("temperature", temperature, -60.0, 60.0, "-60..60 °C")?;
        let relative_humidity =
            check_range("relative_humidity", relative_humidity, 0.0, 100.0, "0-100 %")?;
        let wind_speed = check_non_negative("wind_speed", wind_speed)?;
        let precipitation = check_non_negative("precipitation", precipitation)?;
        check_range("month", f64::from(month), 1.0, 12.0, "1-12")?;
        check_range("day_of_year", f64::from(day_of_year), 1.0, 366.0, "1-366")?;
        Ok(Self {
            temperature,
            relative_humidity,
            wind_speed,
            precipitation,
            month,
            day_of_year,
        })
    }
}

impl WeatherObservation {
    /// Validate presence and range of every field the indices need
    ///
    /// Wind direction is not required by any index and is not checked.
    ///
    /// # Errors
    /// [`crate::AdvisoryError::Parameter`] for a missing field, otherwise see
    /// [`NoonWeather::new`].
    pub fn noon_weather(&self) -> Result<NoonWeather> {
        let temperature = required(self.temperature, "temperature")?;
        let relative_humidity = required(self.relative_humidity, "relative_humidity")?;
        let wind_speed = required(self.wind_speed, "wind_speed")?;
        let precipitation = required(self.precipitation, "precipitation")?;
        NoonWeather::new(
            *temperature,
            *relative_humidity,
            *wind_speed,
            *precipitation,
            self.observed_at.month(),
            self.observed_at.ordinal(),
        )
    }
}
