//! Fire Behaviour Prediction (FBP) System
//!
//! Station-level fire behaviour from fuel type, fire weather indices and
//! location: foliar moisture, fuel consumption, rate of spread, crown
//! fraction burned, head fire intensity and elliptical fire growth.

pub mod advisory;
pub mod consumption;
pub mod crown_fire;
pub mod fire_size;
pub mod foliar_moisture;
pub mod intensity;
pub mod spread;
pub mod threshold_search;

pub use advisory::{
    calculate_advisories, calculate_fire_behaviour_advisory, FireBehaviourAdvisory,
    StationConditions, StationLocation,
};
pub use consumption::{crown_fuel_consumption, surface_fuel_consumption, total_fuel_consumption};
pub use crown_fire::{
    critical_spread_rate, critical_surface_intensity, crown_fraction_burned, FireType,
};
pub use fire_size::{acceleration, length_to_breadth_ratio, spread_distance, FireGrowth};
pub use foliar_moisture::{foliar_moisture_content, minimum_fmc_day};
pub use intensity::{flame_length, head_fire_intensity, mean_intensity_group, IntensityGroup};
pub use spread::{
    back_rate_of_spread, buildup_effect, curing_factor, head_fire_spread, rate_of_spread,
    HeadFireSpread,
};
pub use threshold_search::{find_ffmc_for_hfi, ThresholdCrossing};
