//! Canadian Forest Fire Weather Index (FWI) System
//!
//! Pure, deterministic calculators for the three moisture codes and three
//! fire behaviour indices. Public functions validate their inputs; the
//! `*_raw` variants are used internally once inputs are known to be valid.

pub(crate) mod daily;
pub(crate) mod moisture_codes;
pub(crate) mod spread_indices;

pub use daily::{calculate_daily_indices, calculate_season};
pub use moisture_codes::{drought_code, duff_moisture_code, fine_fuel_moisture_code, FFMC_MAX};
pub use spread_indices::{
    buildup_index, daily_severity_rating, fire_weather_index, initial_spread_index,
};

pub(crate) use spread_indices::{back_isi_raw, isi_raw};
