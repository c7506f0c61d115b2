//! HFI threshold buckets and run metadata

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;

/// Default lower bound of the advisory bucket (kW/m)
pub const ADVISORY_HFI: f64 = 4000.0;
/// Default lower bound of the warning bucket (kW/m)
pub const WARNING_HFI: f64 = 10000.0;

/// Intensity bucket of a raster cell or polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HfiThreshold {
    /// Below the advisory intensity, or no data
    NotAdvisory,
    /// Advisory intensity up to (not including) the warning intensity
    Advisory,
    /// Warning intensity and above
    Warning,
}

impl HfiThreshold {
    /// Classify with the default 4000 / 10000 kW/m bounds (inclusive below)
    pub fn classify(value: f64) -> Self {
        Self::classify_between(value, ADVISORY_HFI, WARNING_HFI)
    }

    /// Classify with the configured bounds
    pub fn classify_with(value: f64, config: &EngineConfig) -> Self {
        Self::classify_between(value, config.advisory_hfi, config.warning_hfi)
    }

    fn classify_between(value: f64, advisory: f64, warning: f64) -> Self {
        if value >= warning {
            HfiThreshold::Warning
        } else if value >= advisory {
            HfiThreshold::Advisory
        } else {
            HfiThreshold::NotAdvisory
        }
    }

    /// Whether polygons are produced for this bucket
    pub const fn is_elevated(self) -> bool {
        !matches!(self, HfiThreshold::NotAdvisory)
    }
}

impl fmt::Display for HfiThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HfiThreshold::NotAdvisory => "not advisory",
            HfiThreshold::Advisory => "advisory",
            HfiThreshold::Warning => "warning",
        })
    }
}

/// Whether a raster comes from forecast or observed weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    Forecast,
    Actual,
}

/// Identifies the model run a raster belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunParameters {
    pub run_type: RunType,
    /// When the run was produced
    pub run_datetime: DateTime<Utc>,
    /// Day the predicted HFI applies to
    pub for_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_bounds_are_inclusive() {
        assert_eq!(HfiThreshold::classify(3999.999), HfiThreshold::NotAdvisory);
        assert_eq!(HfiThreshold::classify(4000.0), HfiThreshold::Advisory);
        assert_eq!(HfiThreshold::classify(9999.999), HfiThreshold::Advisory);
        assert_eq!(HfiThreshold::classify(10000.0), HfiThreshold::Warning);
        assert_eq!(HfiThreshold::classify(0.0), HfiThreshold::NotAdvisory);
    }

    #[test]
    fn test_configured_bounds() {
        let config = EngineConfig {
            advisory_hfi: 2000.0,
            warning_hfi: 5000.0,
            ..EngineConfig::default()
        };
        assert_eq!(HfiThreshold::classify_with(2000.0, &config), HfiThreshold::Advisory);
        assert_eq!(HfiThreshold::classify_with(5000.0, &config), HfiThreshold::Warning);
    }

    #[test]
    fn test_elevated_buckets() {
        assert!(!HfiThreshold::NotAdvisory.is_elevated());
        assert!(HfiThreshold::Advisory.is_elevated());
        assert!(HfiThreshold::Warning.is_elevated());
        assert!(HfiThreshold::Warning > HfiThreshold::Advisory);
    }
}
