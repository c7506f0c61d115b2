//! Error taxonomy for the calculation core
//!
//! Every calculation returns [`Result`]. Errors are raised at the first bad
//! input and propagate to the caller untouched; the core never substitutes a
//! default or returns a partial advisory.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, AdvisoryError>;

/// Errors produced by the index, fire behaviour and HFI aggregation engines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    /// A required numeric input was missing
    #[error("missing required parameter: {name}")]
    Parameter { name: &'static str },

    /// Fuel type code is not one of the FBP fuel types
    #[error("unknown fuel type: {code:?}")]
    UnknownFuelType { code: String },

    /// Raster grid was malformed or unreadable
    #[error("invalid HFI raster: {reason}")]
    RasterInput { reason: String },

    /// Input was present but outside its documented valid range
    #[error("{name} out of range: {value} (expected {expected})")]
    NumericDomain {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// Engine configuration could not be parsed or is inconsistent
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl AdvisoryError {
    pub(crate) fn raster(reason: impl Into<String>) -> Self {
        Self::RasterInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Unwrap an optional input or fail with [`AdvisoryError::Parameter`]
pub(crate) fn required<T>(value: Option<T>, name: &'static str) -> Result<T> {
    value.ok_or(AdvisoryError::Parameter { name })
}

/// Reject non-finite values and values outside `[min, max]`
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<f64> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AdvisoryError::NumericDomain {
            name,
            value,
            expected,
        })
    }
}

/// Reject non-finite and negative values
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64> {
    check_range(name, value, 0.0, f64::INFINITY, ">= 0")
}
