//! Semantic unit types for fire weather and fire behaviour quantities
//!
//! Newtype wrappers keep weather inputs and advisory outputs from being mixed
//! up (a wind speed in km/h is not a spread rate in m/min). Formula code
//! works on raw `f64` through `Deref`; the wrappers live on the data model.
//!
//! # Design Philosophy
//! - All quantities use f64; the FWI/FBP equations are sensitive to rounding
//!   near the FFMC ceiling and in the exponentials of the buildup effect
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//! - Serde support is transparent, so a `Celsius` serializes as a bare number
//!
//! # Usage
//! ```
//! use wildfire_advisory_core::core_types::units::{KilowattsPerMeter, MetersPerMinute};
//!
//! let ros = MetersPerMinute::new(12.5);
//! let hfi = KilowattsPerMeter::new(4200.0);
//! assert!(*ros > 10.0);
//! assert_eq!(hfi.max(KilowattsPerMeter::new(100.0)), hfi);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

macro_rules! unit_type {
    ($(#[$meta:meta])* $name:ident, $suffix:literal, $precision:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(f64);

        impl $name {
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                Self(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:.", $precision, "}", $suffix), self.0)
            }
        }
    };
}

unit_type!(
    /// Air temperature in degrees Celsius
    Celsius, "°C", 1
);
unit_type!(
    /// Percentage (relative humidity, grass curing, crown fraction as percent)
    Percent, "%", 1
);
unit_type!(
    /// Wind speed in km/h (10 m open wind, as reported by fire weather stations)
    KilometersPerHour, " km/h", 1
);
unit_type!(
    /// Precipitation depth in mm
    Millimeters, " mm", 1
);
unit_type!(
    /// Compass direction in degrees (0 = north)
    Degrees, "°", 0
);
unit_type!(
    /// Length in meters (elevation, crown base height, flame length)
    Meters, " m", 2
);
unit_type!(
    /// Rate of spread in m/min
    MetersPerMinute, " m/min", 2
);
unit_type!(
    /// Fire intensity in kW/m
    KilowattsPerMeter, " kW/m", 0
);
unit_type!(
    /// Fuel consumption in kg/m²
    KilogramsPerSquareMeter, " kg/m²", 3
);
unit_type!(
    /// Area in hectares
    Hectares, " ha", 3
);

impl Percent {
    /// Convert to a fraction (0-1)
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl Hectares {
    /// Square meters per hectare
    pub const SQUARE_METERS: f64 = 10_000.0;

    /// Convert an area in m² to hectares
    #[inline]
    #[must_use]
    pub fn from_square_meters(area: f64) -> Self {
        Self(area / Self::SQUARE_METERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_suffixes() {
        assert_eq!(Celsius::new(17.04).to_string(), "17.0°C");
        assert_eq!(KilowattsPerMeter::new(4000.4).to_string(), "4000 kW/m");
        assert_eq!(MetersPerMinute::new(2.854).to_string(), "2.85 m/min");
    }

    #[test]
    fn test_total_ordering_handles_nan() {
        let mut values = vec![
            MetersPerMinute::new(f64::NAN),
            MetersPerMinute::new(3.0),
            MetersPerMinute::new(1.0),
        ];
        values.sort();
        assert_eq!(*values[0], 1.0);
        assert_eq!(*values[1], 3.0);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Percent::new(60.0).to_fraction(), 0.6);
        assert_eq!(*Hectares::from_square_meters(25_000.0), 2.5);
        let raw: f64 = Millimeters::new(2.4).into();
        assert_eq!(raw, 2.4);
    }
}
