//! Reproducible input generation
//!
//! Draws weather, index and station inputs uniformly over the ranges the
//! calculators are validated for. A fixed seed always yields the same
//! sequence, which keeps fuzz-style tests and demo output stable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core_types::fuel::{FuelType, StationFuelOverrides};
use crate::core_types::indices::MoistureCodes;
use crate::core_types::weather::NoonWeather;
use crate::error::Result;
use crate::fbp::{StationConditions, StationLocation};
use crate::hfi::{GeoTransform, HfiGrid};

/// Seed used by the test suite and the demo
pub const DEFAULT_SEED: u64 = 42;

/// Cumulative day of year at the start of each month (non-leap)
const MONTH_START: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Seeded generator of calculator inputs
pub struct ScenarioSampler {
    rng: StdRng,
}

impl Default for ScenarioSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl ScenarioSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Noon weather: 0-40 °C, 0-100 % RH, 0-40 km/h, 0-50 mm
    ///
    /// # Errors
    /// Never for the sampled ranges; the checked constructor is reused.
    pub fn noon_weather(&mut self) -> Result<NoonWeather> {
        let month = self.rng.random_range(1..=12u32);
        let index = (month - 1) as usize;
        let day = self.rng.random_range(1..=MONTH_DAYS[index]);
        NoonWeather::new(
            self.rng.random_range(0.0..=40.0),
            self.rng.random_range(0.0..=100.0),
            self.rng.random_range(0.0..=40.0),
            self.rng.random_range(0.0..=50.0),
            month,
            MONTH_START[index] + day,
        )
    }

    /// Yesterday's codes: FFMC 11-100, DMC 11-205, DC 0-600
    pub fn moisture_codes(&mut self) -> MoistureCodes {
        MoistureCodes {
            ffmc: self.rng.random_range(11.0..=100.0),
            dmc: self.rng.random_range(11.0..=205.0),
            dc: self.rng.random_range(0.0..=600.0),
        }
    }

    /// Latitude within the Canadian fire season belt
    pub fn latitude(&mut self) -> f64 {
        self.rng.random_range(42.0..=60.0)
    }

    /// Station conditions for one fuel type with sampled indices and location
    ///
    /// Grass fuels get a sampled curing; other fuels use table parameters.
    pub fn station_conditions(
        &mut self,
        station_code: u32,
        fuel_type: FuelType,
    ) -> StationConditions {
        let grass_cure = fuel_type
            .is_grass()
            .then(|| self.rng.random_range(0.0..=100.0));
        StationConditions {
            station_code,
            location: StationLocation {
                latitude: self.latitude(),
                longitude: self.rng.random_range(-139.0..=-114.0),
                elevation: self
                    .rng
                    .random_bool(0.8)
                    .then(|| self.rng.random_range(0.0..=2500.0)),
            },
            fuel_type,
            fuel_overrides: StationFuelOverrides {
                grass_cure,
                ..StationFuelOverrides::default()
            },
            day_of_year: self.rng.random_range(91..=304),
            ffmc: Some(self.rng.random_range(11.0..=100.0)),
            bui: Some(self.rng.random_range(0.0..=250.0)),
            wind_speed: Some(self.rng.random_range(0.0..=40.0)),
        }
    }

    /// Random HFI surface with smooth hot spots, in unit cells
    ///
    /// # Errors
    /// Only if `width` or `height` is zero.
    pub fn hfi_grid(&mut self, width: usize, height: usize) -> Result<HfiGrid> {
        let spots: Vec<(f64, f64, f64)> = (0..3)
            .map(|_| {
                (
                    self.rng.random_range(0.0..=width as f64),
                    self.rng.random_range(0.0..=height as f64),
                    self.rng.random_range(5000.0..=30000.0),
                )
            })
            .collect();
        let radius = (width.max(height) as f64 / 4.0).max(1.0);
        let mut values = Vec::with_capacity(width * height);
        for row in 0..height {
            for column in 0..width {
                let (x, y) = (column as f64 + 0.5, row as f64 + 0.5);
                let hfi = spots
                    .iter()
                    .map(|&(sx, sy, peak)| {
                        let d2 = (x - sx).powi(2) + (y - sy).powi(2);
                        peak * (-d2 / (2.0 * radius * radius)).exp()
                    })
                    .fold(0.0, f64::max);
                values.push(hfi * self.rng.random_range(0.8..=1.2));
            }
        }
        HfiGrid::new(width, height, values, None, GeoTransform::identity())
    }
}
