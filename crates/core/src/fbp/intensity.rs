//! Head fire intensity, flame length and intensity class
//!
//! # References
//! - Byram, G.M. (1959). "Combustion of forest fuels". In Forest Fire:
//!   Control and Use, Chapter 3
//! - Forestry Canada Fire Danger Group (1992), ST-X-3, Eq. 69

use serde::{Deserialize, Serialize};

/// Head fire intensity (kW/m), HFI = 300 × TFC × ROS
///
/// 300 is the low heat of combustion (18000 kJ/kg) divided by 60 s/min.
pub fn head_fire_intensity(total_fuel_consumption: f64, rate_of_spread: f64) -> f64 {
    300.0 * total_fuel_consumption * rate_of_spread
}

/// Flame length (m) from Byram's relation, L = 0.0775 × I^0.46
pub fn flame_length(head_fire_intensity: f64) -> f64 {
    0.0775 * head_fire_intensity.max(0.0).powf(0.46)
}

/// Fire intensity class used in preparedness planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntensityGroup {
    /// HFI below 500 kW/m
    One = 1,
    /// 500 to 1000 kW/m
    Two = 2,
    /// 1000 to 2000 kW/m
    Three = 3,
    /// 2000 to 4000 kW/m
    Four = 4,
    /// 4000 kW/m and above
    Five = 5,
}

impl IntensityGroup {
    pub fn from_hfi(head_fire_intensity: f64) -> Self {
        if head_fire_intensity < 500.0 {
            IntensityGroup::One
        } else if head_fire_intensity < 1000.0 {
            IntensityGroup::Two
        } else if head_fire_intensity < 2000.0 {
            IntensityGroup::Three
        } else if head_fire_intensity < 4000.0 {
            IntensityGroup::Four
        } else {
            IntensityGroup::Five
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Mean intensity group over the stations of a planning area
///
/// Rounded to one decimal place; `None` when there are no stations.
pub fn mean_intensity_group(groups: &[IntensityGroup]) -> Option<f64> {
    if groups.is_empty() {
        return None;
    }
    let sum: f64 = groups.iter().map(|g| f64::from(g.value())).sum();
    let mean = sum / groups.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
