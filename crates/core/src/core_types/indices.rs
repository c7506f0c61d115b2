//! FWI System codes and indices for one station-day

use serde::{Deserialize, Serialize};

/// Moisture codes carried from one day to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureCodes {
    pub ffmc: f64,
    pub dmc: f64,
    pub dc: f64,
}

impl MoistureCodes {
    /// Standard season start-up values (FFMC 85, DMC 6, DC 15)
    pub const SEASON_START: MoistureCodes = MoistureCodes {
        ffmc: 85.0,
        dmc: 6.0,
        dc: 15.0,
    };
}

impl Default for MoistureCodes {
    fn default() -> Self {
        Self::SEASON_START
    }
}

/// All six FWI System components for a station and date
///
/// Never edited in place: every value is recomputed from the previous day's
/// codes and today's weather.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireIndices {
    /// Fine Fuel Moisture Code, 0-101
    pub ffmc: f64,
    /// Duff Moisture Code
    pub dmc: f64,
    /// Drought Code
    pub dc: f64,
    /// Initial Spread Index
    pub isi: f64,
    /// Buildup Index
    pub bui: f64,
    /// Fire Weather Index
    pub fwi: f64,
}

impl FireIndices {
    /// The moisture codes to feed into tomorrow's calculation
    pub fn moisture_codes(&self) -> MoistureCodes {
        MoistureCodes {
            ffmc: self.ffmc,
            dmc: self.dmc,
            dc: self.dc,
        }
    }
}
