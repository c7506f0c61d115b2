//! Elliptical fire growth from a point ignition
//!
//! A point ignition accelerates towards its equilibrium spread rate; open
//! fuels get there quickly, closed canopies more slowly as crowning
//! increases. The fire is modelled as an ellipse whose length-to-breadth
//! ratio grows with wind speed.
//!
//! # References
//! Forestry Canada Fire Danger Group (1992), ST-X-3, Eq. 70-72, 79-81, 84

use crate::core_types::fuel::{FuelFamily, FuelType};
use crate::core_types::units::Hectares;
use crate::error::{check_non_negative, Result};

/// Acceleration parameter for open fuel types
pub const OPEN_FUEL_ACCELERATION: f64 = 0.115;

/// Length-to-breadth ratio of the fire ellipse
pub fn length_to_breadth_ratio(fuel_type: FuelType, wind_speed: f64) -> f64 {
    if fuel_type.is_grass() {
        if wind_speed < 1.0 {
            1.0
        } else {
            1.1 * wind_speed.powf(0.464)
        }
    } else {
        1.0 + 8.729 * (1.0 - (-0.030 * wind_speed).exp()).powf(2.155)
    }
}

/// Point-ignition acceleration parameter (per minute)
pub fn acceleration(fuel_type: FuelType, crown_fraction_burned: f64) -> f64 {
    let open = matches!(
        fuel_type.family(),
        FuelFamily::Grass | FuelFamily::Slash | FuelFamily::Deciduous
    ) || fuel_type == FuelType::C1;
    if open {
        OPEN_FUEL_ACCELERATION
    } else {
        OPEN_FUEL_ACCELERATION
            - 18.8 * crown_fraction_burned.powf(2.5) * (-8.0 * crown_fraction_burned).exp()
    }
}

/// Distance (m) travelled after `minutes` at equilibrium rate `rate_of_spread`
pub fn spread_distance(rate_of_spread: f64, acceleration: f64, minutes: f64) -> f64 {
    if minutes <= 0.0 {
        return 0.0;
    }
    rate_of_spread * (minutes + (-acceleration * minutes).exp() / acceleration - 1.0 / acceleration)
}

/// Inputs to a fire size projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireGrowth {
    pub fuel_type: FuelType,
    pub wind_speed: f64,
    pub head_rate_of_spread: f64,
    pub back_rate_of_spread: f64,
    pub crown_fraction_burned: f64,
}

impl FireGrowth {
    /// Burned area after `minutes` of free growth
    ///
    /// # Errors
    /// [`crate::AdvisoryError::NumericDomain`] for negative or non-finite
    /// spread rates, wind or duration.
    pub fn area_after(&self, minutes: f64) -> Result<Hectares> {
        let minutes = check_non_negative("minutes", minutes)?;
        let head = check_non_negative("head_rate_of_spread", self.head_rate_of_spread)?;
        let back = check_non_negative("back_rate_of_spread", self.back_rate_of_spread)?;
        let wind_speed = check_non_negative("wind_speed", self.wind_speed)?;

        let alpha = acceleration(self.fuel_type, self.crown_fraction_burned.clamp(0.0, 1.0));
        let head_distance = spread_distance(head, alpha, minutes);
        let back_distance = spread_distance(back, alpha, minutes);
        let lb = length_to_breadth_ratio(self.fuel_type, wind_speed);
        let length = head_distance + back_distance;
        Ok(Hectares::from_square_meters(
            std::f64::consts::PI / (4.0 * lb) * length * length,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_to_breadth() {
        assert_eq!(length_to_breadth_ratio(FuelType::C2, 0.0), 1.0);
        assert_eq!(length_to_breadth_ratio(FuelType::O1a, 0.5), 1.0);
        assert_relative_eq!(
            length_to_breadth_ratio(FuelType::O1b, 20.0),
            1.1 * 20f64.powf(0.464)
        );
        let calm = length_to_breadth_ratio(FuelType::C2, 10.0);
        assert!(length_to_breadth_ratio(FuelType::C2, 40.0) > calm);
    }

    #[test]
    fn test_acceleration_by_canopy() {
        assert_eq!(acceleration(FuelType::C1, 0.8), OPEN_FUEL_ACCELERATION);
        assert_eq!(acceleration(FuelType::S2, 0.8), OPEN_FUEL_ACCELERATION);
        assert_eq!(acceleration(FuelType::C3, 0.0), OPEN_FUEL_ACCELERATION);
        assert!(acceleration(FuelType::C3, 0.5) < OPEN_FUEL_ACCELERATION);
    }

    #[test]
    fn test_distance_approaches_equilibrium() {
        let ros = 10.0;
        let early = spread_distance(ros, OPEN_FUEL_ACCELERATION, 5.0);
        assert!(early < ros * 5.0);
        let late = spread_distance(ros, OPEN_FUEL_ACCELERATION, 600.0);
        let steady = ros * (600.0 - 1.0 / OPEN_FUEL_ACCELERATION);
        assert_relative_eq!(late, steady, max_relative = 1e-9);
        assert_eq!(spread_distance(ros, OPEN_FUEL_ACCELERATION, 0.0), 0.0);
    }

    #[test]
    fn test_area_grows_with_time() {
        let growth = FireGrowth {
            fuel_type: FuelType::C2,
            wind_speed: 20.0,
            head_rate_of_spread: 12.0,
            back_rate_of_spread: 0.8,
            crown_fraction_burned: 0.6,
        };
        let thirty = growth.area_after(30.0).unwrap();
        let sixty = growth.area_after(60.0).unwrap();
        assert!(*thirty > 0.0);
        assert!(sixty > thirty);
        assert_eq!(*growth.area_after(0.0).unwrap(), 0.0);
    }
}
