//! Inverse search: the FFMC at which a fire reaches a given intensity
//!
//! HFI rises monotonically with FFMC when every other input is held fixed,
//! so bisection over the FFMC scale converges on the crossing point.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::fwi::FFMC_MAX;

/// Result of searching for the FFMC that produces a target HFI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCrossing {
    /// FFMC at the crossing, or the FFMC ceiling if never reached
    pub ffmc: f64,
    /// HFI (kW/m) produced at `ffmc`
    pub hfi: f64,
    /// Whether the target is attainable on the FFMC scale
    pub reached: bool,
}

/// Bisect FFMC over [0, 101] until `hfi_at(ffmc)` is within the configured
/// relative tolerance of `target_hfi` or the iteration cap is hit
///
/// When the cap stops the search first, the upper end of the final bracket
/// is returned so the reported HFI is never below the target.
///
/// A target above the HFI at FFMC 101 is not an error: the ceiling and the
/// maximum attainable HFI are returned with `reached = false`.
///
/// # Errors
/// Propagates any error from `hfi_at`.
pub fn find_ffmc_for_hfi<F>(
    target_hfi: f64,
    hfi_at: F,
    config: &EngineConfig,
) -> Result<ThresholdCrossing>
where
    F: Fn(f64) -> Result<f64>,
{
    let max_hfi = hfi_at(FFMC_MAX)?;
    if max_hfi < target_hfi {
        warn!(
            "HFI {:.0} kW/m unreachable, maximum is {:.0} kW/m at FFMC {}",
            target_hfi, max_hfi, FFMC_MAX
        );
        return Ok(ThresholdCrossing {
            ffmc: FFMC_MAX,
            hfi: max_hfi,
            reached: false,
        });
    }

    let within = |hfi: f64| ((hfi - target_hfi) / target_hfi).abs() <= config.search_tolerance;
    let mut low = 0.0;
    let mut high = FFMC_MAX;
    let mut high_hfi = max_hfi;
    if !within(max_hfi) {
        for _ in 0..config.search_max_iterations {
            let ffmc = (low + high) / 2.0;
            let hfi = hfi_at(ffmc)?;
            if within(hfi) {
                return Ok(ThresholdCrossing {
                    ffmc,
                    hfi,
                    reached: true,
                });
            }
            if hfi < target_hfi {
                low = ffmc;
            } else {
                high = ffmc;
                high_hfi = hfi;
            }
        }
        debug!(
            "Iteration cap hit searching for HFI {:.0} kW/m, bracket [{:.3}, {:.3}]",
            target_hfi, low, high
        );
    }

    // Upper end of the bracket always produces at least the target
    Ok(ThresholdCrossing {
        ffmc: high,
        hfi: high_hfi,
        reached: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisoryError;
    use approx::assert_relative_eq;

    fn quadratic(ffmc: f64) -> Result<f64> {
        Ok(ffmc * ffmc)
    }

    #[test]
    fn test_converges_within_tolerance() {
        let config = EngineConfig::default();
        let crossing = find_ffmc_for_hfi(4000.0, quadratic, &config).unwrap();
        assert!(crossing.reached);
        assert_relative_eq!(crossing.hfi, 4000.0, max_relative = 0.01);
        assert_relative_eq!(crossing.ffmc, 4000f64.sqrt(), max_relative = 0.01);
    }

    #[test]
    fn test_unreachable_target_reports_maximum() {
        let config = EngineConfig::default();
        let crossing = find_ffmc_for_hfi(20000.0, quadratic, &config).unwrap();
        assert!(!crossing.reached);
        assert_eq!(crossing.ffmc, FFMC_MAX);
        assert_eq!(crossing.hfi, 101.0 * 101.0);
    }

    #[test]
    fn test_search_is_repeatable() {
        let config = EngineConfig::default();
        let first = find_ffmc_for_hfi(2500.0, quadratic, &config).unwrap();
        let second = find_ffmc_for_hfi(2500.0, quadratic, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iteration_cap_respected() {
        let config = EngineConfig {
            search_max_iterations: 3,
            search_tolerance: 1e-12,
            ..EngineConfig::default()
        };
        let calls = std::cell::Cell::new(0);
        let crossing = find_ffmc_for_hfi(
            4000.0,
            |ffmc| {
                calls.set(calls.get() + 1);
                quadratic(ffmc)
            },
            &config,
        )
        .unwrap();
        assert!(crossing.reached);
        assert_eq!(calls.get(), 4);
        // Bracket after 50.5, 75.75, 63.125 is [63.125, 75.75]
        assert_eq!(crossing.ffmc, 75.75);
        assert_eq!(crossing.hfi, 75.75 * 75.75);
        assert!(crossing.hfi >= 4000.0);
    }

    #[test]
    fn test_errors_propagate() {
        let config = EngineConfig::default();
        let result = find_ffmc_for_hfi(
            4000.0,
            |_| Err(AdvisoryError::Parameter { name: "bui" }),
            &config,
        );
        assert_eq!(result, Err(AdvisoryError::Parameter { name: "bui" }));
    }
}
