//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// The lot itself
    pub lot: RawLotConfig,

    /// Fee policy (default: 10 per started minute)
    #[serde(default)]
    pub pricing: Option<RawPricing>,

    /// Front-desk display settings
    #[serde(default)]
    pub desk: RawDeskConfig,
}

/// Lot settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawLotConfig {
    /// Display name
    pub name: Option<String>,

    /// Number of slots, fixed for the lifetime of the lot
    pub capacity: u64,
}

/// Fee policy selection
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawPricing {
    /// `unit_rate` for every started `unit_seconds`
    PerStartedUnit {
        unit_rate: u64,
        #[serde(default = "default_unit_seconds")]
        unit_seconds: u64,
    },
    /// Fixed amount for any non-zero stay
    Flat { amount: u64 },
    /// Per started unit, with a rate per vehicle category
    ByCategory {
        #[serde(default = "default_unit_seconds")]
        unit_seconds: u64,
        car: u64,
        bike: u64,
        truck: u64,
    },
}

fn default_unit_seconds() -> u64 {
    60
}

/// Front-desk display settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDeskConfig {
    /// Currency symbol printed before amounts
    pub currency: Option<String>,
}
