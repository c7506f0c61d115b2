//! Wildfire Advisory Core Library
//!
//! Calculation engine for wildfire danger advisories, built on the Canadian
//! Forest Fire Danger Rating System (CFFDRS).
//!
//! ## Pipeline
//!
//! - Noon weather → Fire Weather Index System codes and indices ([`fwi`])
//! - Indices + fuel type + location → per-station fire behaviour
//!   prediction, including the FFMC at which a fire reaches advisory or
//!   warning intensity ([`fbp`])
//! - Gridded head fire intensity → classified polygons → per-zone advisory
//!   area statistics ([`hfi`])
//!
//! Every calculation is a pure function of its inputs and returns
//! [`Result`]; a missing or out-of-range input fails the calculation
//! instead of being replaced with a default.

// Shared data model
pub mod core_types;

// Engine-wide settings and error taxonomy
pub mod config;
pub mod error;

// Calculators
pub mod fbp;
pub mod fwi;
pub mod hfi;

// Seeded input generation for tests and demos
pub mod scenarios;

pub use config::EngineConfig;
pub use error::{AdvisoryError, Result};

// Re-export core types
pub use core_types::{
    FireIndices, FuelFamily, FuelType, FuelTypeParameters, MoistureCodes, NoonWeather,
    ResolvedFuel, StationFuelOverrides, WeatherObservation,
};

// Re-export calculator entry points
pub use fbp::{
    calculate_advisories, calculate_fire_behaviour_advisory, FireBehaviourAdvisory, FireType,
    IntensityGroup, StationConditions, StationLocation, ThresholdCrossing,
};
pub use fwi::{calculate_daily_indices, calculate_season};
pub use hfi::{
    classify_and_aggregate, ClassifiedHfiPolygon, FireZone, FuelCoverage, FuelTypeHfiArea,
    HfiGrid, HfiThreshold, RunParameters, RunType, ZoneAreaSummary,
};
pub use scenarios::ScenarioSampler;
