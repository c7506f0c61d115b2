//! FBP fuel types and their stand parameters
//!
//! The Canadian FBP System defines a closed set of benchmark fuel types. Each
//! resolves to exactly one parameter set; the mapping is an exhaustive
//! `match`, so adding a fuel type without parameters does not compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{check_range, AdvisoryError, Result};

/// FBP System fuel type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelType {
    /// Spruce-lichen woodland
    C1,
    /// Boreal spruce
    C2,
    /// Mature jack or lodgepole pine
    C3,
    /// Immature jack or lodgepole pine
    C4,
    /// Red and white pine
    C5,
    /// Conifer plantation
    C6,
    /// Ponderosa pine / Douglas-fir
    C7,
    /// Leafless aspen
    D1,
    /// Green aspen
    D2,
    /// Boreal mixedwood, leafless
    M1,
    /// Boreal mixedwood, green
    M2,
    /// Dead balsam fir mixedwood, leafless
    M3,
    /// Dead balsam fir mixedwood, green
    M4,
    /// Matted grass
    #[serde(rename = "O1A")]
    O1a,
    /// Standing grass
    #[serde(rename = "O1B")]
    O1b,
    /// Jack or lodgepole pine slash
    S1,
    /// White spruce / balsam slash
    S2,
    /// Coastal cedar / hemlock / Douglas-fir slash
    S3,
}

/// Fuel type family; each family owns one rate-of-spread strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelFamily {
    Conifer,
    Deciduous,
    Mixedwood,
    Grass,
    Slash,
}

/// Stand structure parameters for a fuel type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelTypeParameters {
    /// Percent conifer (%), used by M1/M2
    pub percent_conifer: f64,
    /// Percent dead balsam fir (%), used by M3/M4
    pub percent_dead_balsam_fir: f64,
    /// Crown closure; for O1 fuels the curing percent is supplied separately
    pub crown_closure: f64,
    /// Crown base height (m)
    pub crown_base_height: f64,
}

impl FuelTypeParameters {
    const fn new(pc: f64, pdf: f64, cc: f64, cbh: f64) -> Self {
        Self {
            percent_conifer: pc,
            percent_dead_balsam_fir: pdf,
            crown_closure: cc,
            crown_base_height: cbh,
        }
    }
}

impl FuelType {
    /// Every fuel type, in table order
    pub const ALL: [FuelType; 18] = [
        FuelType::C1,
        FuelType::C2,
        FuelType::C3,
        FuelType::C4,
        FuelType::C5,
        FuelType::C6,
        FuelType::C7,
        FuelType::D1,
        FuelType::D2,
        FuelType::M1,
        FuelType::M2,
        FuelType::M3,
        FuelType::M4,
        FuelType::O1a,
        FuelType::O1b,
        FuelType::S1,
        FuelType::S2,
        FuelType::S3,
    ];

    /// Canonical code as used by the FBP System ("C2", "O1B", ...)
    pub const fn code(self) -> &'static str {
        match self {
            FuelType::C1 => "C1",
            FuelType::C2 => "C2",
            FuelType::C3 => "C3",
            FuelType::C4 => "C4",
            FuelType::C5 => "C5",
            FuelType::C6 => "C6",
            FuelType::C7 => "C7",
            FuelType::D1 => "D1",
            FuelType::D2 => "D2",
            FuelType::M1 => "M1",
            FuelType::M2 => "M2",
            FuelType::M3 => "M3",
            FuelType::M4 => "M4",
            FuelType::O1a => "O1A",
            FuelType::O1b => "O1B",
            FuelType::S1 => "S1",
            FuelType::S2 => "S2",
            FuelType::S3 => "S3",
        }
    }

    pub const fn family(self) -> FuelFamily {
        match self {
            FuelType::C1
            | FuelType::C2
            | FuelType::C3
            | FuelType::C4
            | FuelType::C5
            | FuelType::C6
            | FuelType::C7 => FuelFamily::Conifer,
            FuelType::D1 | FuelType::D2 => FuelFamily::Deciduous,
            FuelType::M1 | FuelType::M2 | FuelType::M3 | FuelType::M4 => FuelFamily::Mixedwood,
            FuelType::O1a | FuelType::O1b => FuelFamily::Grass,
            FuelType::S1 | FuelType::S2 | FuelType::S3 => FuelFamily::Slash,
        }
    }

    /// Stand parameters from the Red Book fire intensity class tables
    ///
    /// Where the field guide lists several stand configurations a single one
    /// is fixed here: C6 uses the 7 m crown base, M1/M2 are 50% conifer and
    /// M3/M4 are 60% dead balsam fir. Fuels without a listed crown base height
    /// or crown closure use 1.
    pub const fn parameters(self) -> FuelTypeParameters {
        match self {
            FuelType::C1 => FuelTypeParameters::new(100.0, 0.0, 1.0, 2.0),
            FuelType::C2 => FuelTypeParameters::new(100.0, 0.0, 1.0, 3.0),
            FuelType::C3 => FuelTypeParameters::new(100.0, 0.0, 1.0, 8.0),
            FuelType::C4 => FuelTypeParameters::new(100.0, 0.0, 1.0, 4.0),
            FuelType::C5 => FuelTypeParameters::new(100.0, 0.0, 1.0, 18.0),
            FuelType::C6 => FuelTypeParameters::new(100.0, 0.0, 1.0, 7.0),
            FuelType::C7 => FuelTypeParameters::new(100.0, 0.0, 1.0, 10.0),
            FuelType::D1 | FuelType::D2 => FuelTypeParameters::new(0.0, 0.0, 1.0, 1.0),
            FuelType::M1 | FuelType::M2 => FuelTypeParameters::new(50.0, 0.0, 1.0, 6.0),
            FuelType::M3 | FuelType::M4 => FuelTypeParameters::new(0.0, 60.0, 1.0, 6.0),
            FuelType::O1a
            | FuelType::O1b
            | FuelType::S1
            | FuelType::S2
            | FuelType::S3 => FuelTypeParameters::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Crown fuel load (kg/m²); zero for fuels that cannot crown
    pub const fn crown_fuel_load(self) -> f64 {
        match self {
            FuelType::C1 => 0.75,
            FuelType::C2 | FuelType::M1 | FuelType::M2 | FuelType::M3 | FuelType::M4 => 0.8,
            FuelType::C3 => 1.15,
            FuelType::C4 | FuelType::C5 => 1.2,
            FuelType::C6 => 1.8,
            FuelType::C7 => 0.5,
            FuelType::D1
            | FuelType::D2
            | FuelType::O1a
            | FuelType::O1b
            | FuelType::S1
            | FuelType::S2
            | FuelType::S3 => 0.0,
        }
    }

    /// Whether crown fraction burned is computed for this fuel
    pub const fn can_crown(self) -> bool {
        matches!(self.family(), FuelFamily::Conifer | FuelFamily::Mixedwood)
    }

    pub const fn is_grass(self) -> bool {
        matches!(self.family(), FuelFamily::Grass)
    }
}

impl FromStr for FuelType {
    type Err = AdvisoryError;

    fn from_str(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.code() == trimmed)
            .ok_or_else(|| AdvisoryError::UnknownFuelType {
                code: code.to_string(),
            })
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Look up stand parameters by fuel type code
///
/// # Errors
/// Returns [`AdvisoryError::UnknownFuelType`] for codes outside the FBP set.
pub fn fuel_type_parameters(code: &str) -> Result<FuelTypeParameters> {
    code.parse::<FuelType>().map(FuelType::parameters)
}

/// Per-station adjustments to the table defaults
///
/// A station request may carry its own stand description. Any field left as
/// `None` falls back to [`FuelType::parameters`]; grass curing has no table
/// default and must be present for O1 fuels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StationFuelOverrides {
    pub percent_conifer: Option<f64>,
    pub percent_dead_balsam_fir: Option<f64>,
    pub crown_base_height: Option<f64>,
    /// Degree of grass curing (%)
    pub grass_cure: Option<f64>,
}

/// Fuel description after table lookup and overrides are merged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFuel {
    pub fuel_type: FuelType,
    pub parameters: FuelTypeParameters,
    pub grass_cure: Option<f64>,
}

impl ResolvedFuel {
    /// Merge overrides over the table values, validating ranges
    ///
    /// # Errors
    /// Returns [`AdvisoryError::NumericDomain`] if an override is outside its
    /// physical range, or [`AdvisoryError::Parameter`] if an O1 fuel has no
    /// grass curing.
    pub fn resolve(fuel_type: FuelType, overrides: &StationFuelOverrides) -> Result<Self> {
        let mut parameters = fuel_type.parameters();
        if let Some(pc) = overrides.percent_conifer {
            parameters.percent_conifer = check_range("percent_conifer", pc, 0.0, 100.0, "0-100")?;
        }
        if let Some(pdf) = overrides.percent_dead_balsam_fir {
            parameters.percent_dead_balsam_fir =
                check_range("percent_dead_balsam_fir", pdf, 0.0, 100.0, "0-100")?;
        }
        if let Some(cbh) = overrides.crown_base_height {
            parameters.crown_base_height =
                check_range("crown_base_height", cbh, 0.0, 50.0, "0-50 m")?;
        }
        let grass_cure = match overrides.grass_cure {
            Some(cure) => Some(check_range("grass_cure", cure, 0.0, 100.0, "0-100")?),
            None if fuel_type.is_grass() => {
                return Err(AdvisoryError::Parameter { name: "grass_cure" });
            }
            None => None,
        };
        Ok(Self {
            fuel_type,
            parameters,
            grass_cure,
        })
    }

    /// Table parameters with no overrides (O1 fuels still need curing)
    ///
    /// # Errors
    /// See [`ResolvedFuel::resolve`].
    pub fn from_table(fuel_type: FuelType) -> Result<Self> {
        Self::resolve(fuel_type, &StationFuelOverrides::default())
    }
}
