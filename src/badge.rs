// 🏷️ Environmental Badge - DGT label from registration year + fuel
// Advisory only: every (year, fuel) pair yields a result, never an error.

use crate::resolver::Resolution;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

// ============================================================================
// FUEL TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Electric,
    PluginHybrid,
    Hybrid,
    /// LPG / CNG
    Gas,
    Gasoline,
    Diesel,
    /// Anything unrecognized; classified with the strictest thresholds
    Other,
}

impl FuelType {
    /// Lenient parse: Spanish and English names, case-insensitive.
    pub fn parse(input: &str) -> FuelType {
        match input.trim().to_lowercase().as_str() {
            "electric" | "electrico" | "eléctrico" | "bev" | "ev" => FuelType::Electric,
            "plugin_hybrid" | "plug-in" | "plugin" | "phev" | "enchufable" | "rex" | "erev" => {
                FuelType::PluginHybrid
            }
            "hybrid" | "hibrido" | "híbrido" | "hev" | "mhev" => FuelType::Hybrid,
            "gas" | "glp" | "gnc" | "lpg" | "cng" | "gnl" => FuelType::Gas,
            "gasoline" | "gasolina" | "petrol" => FuelType::Gasoline,
            "diesel" | "diésel" | "gasoil" | "gasóleo" => FuelType::Diesel,
            _ => FuelType::Other,
        }
    }
}

impl FromStr for FuelType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FuelType::parse(s))
    }
}

// ============================================================================
// BADGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Zero,
    Eco,
    C,
    B,
    None,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Zero => "0",
            Badge::Eco => "ECO",
            Badge::C => "C",
            Badge::B => "B",
            Badge::None => "Sin distintivo",
        }
    }

    pub fn image_ref(&self) -> Option<&'static str> {
        match self {
            Badge::Zero => Some("badges/cero.svg"),
            Badge::Eco => Some("badges/eco.svg"),
            Badge::C => Some("badges/c.svg"),
            Badge::B => Some("badges/b.svg"),
            Badge::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeResult {
    pub badge: Badge,
    pub label: String,
    pub image_ref: Option<String>,
}

impl From<Badge> for BadgeResult {
    fn from(badge: Badge) -> Self {
        BadgeResult {
            badge,
            label: badge.label().to_string(),
            image_ref: badge.image_ref().map(str::to_string),
        }
    }
}

// ============================================================================
// POLICY
// ============================================================================

/// First registration year that qualifies for each combustion tier.
///
/// Defaults follow the DGT thresholds: Euro 4 petrol from 2006 (C) and
/// Euro 3 from 2001 (B); Euro 6 diesel from late 2015 (C) and Euro 4 from
/// 2006 (B). With only a year available, 2015 diesel stays at B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgePolicy {
    pub gasoline_c_from: i32,
    pub gasoline_b_from: i32,
    pub diesel_c_from: i32,
    pub diesel_b_from: i32,
}

impl Default for BadgePolicy {
    fn default() -> Self {
        BadgePolicy {
            gasoline_c_from: 2006,
            gasoline_b_from: 2001,
            diesel_c_from: 2016,
            diesel_b_from: 2006,
        }
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct BadgeClassifier {
    policy: BadgePolicy,
}

impl BadgeClassifier {
    pub fn new(policy: BadgePolicy) -> Self {
        BadgeClassifier { policy }
    }

    pub fn classify(&self, year: i32, fuel: FuelType) -> BadgeResult {
        let (c_from, b_from) = match fuel {
            FuelType::Electric | FuelType::PluginHybrid => return Badge::Zero.into(),
            FuelType::Hybrid | FuelType::Gas => return Badge::Eco.into(),
            FuelType::Gasoline => (self.policy.gasoline_c_from, self.policy.gasoline_b_from),
            FuelType::Diesel | FuelType::Other => (self.policy.diesel_c_from, self.policy.diesel_b_from),
        };

        let badge = if year >= c_from {
            Badge::C
        } else if year >= b_from {
            Badge::B
        } else {
            Badge::None
        };
        badge.into()
    }

    /// Classify using the earliest year a resolution allows.
    ///
    /// Transitions use the earlier month; future plates use the last known
    /// year as a lower bound. `NotFound` has no year to classify.
    pub fn classify_resolution(&self, resolution: &Resolution, fuel: FuelType) -> Option<BadgeResult> {
        resolution.period().map(|p| self.classify(p.year, fuel))
    }
}

// ============================================================================
// TESTS
// ============================================================================
