//! Validated policy structures

use crate::schema::{RawConfig, RawPricing};
use parkd_api::VehicleCategory;
use std::num::NonZeroU32;
use std::time::Duration;

/// Default lot capacity when none is configured
pub const DEFAULT_CAPACITY: NonZeroU32 = match NonZeroU32::new(5) {
    Some(capacity) => capacity,
    None => NonZeroU32::MIN,
};

/// Default charge per started minute
pub const DEFAULT_UNIT_RATE: u64 = 10;

/// Validated lot policy ready for use by the core
#[derive(Debug, Clone, PartialEq)]
pub struct LotPolicy {
    pub name: String,
    pub capacity: NonZeroU32,
    pub pricing: PricingPolicy,
    pub desk: DeskConfig,
}

impl LotPolicy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let capacity = u32::try_from(raw.lot.capacity)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MIN);

        Self {
            name: raw.lot.name.unwrap_or_else(default_lot_name),
            capacity,
            pricing: raw
                .pricing
                .map(PricingPolicy::from_raw)
                .unwrap_or_default(),
            desk: DeskConfig {
                currency: raw.desk.currency.unwrap_or_else(default_currency),
            },
        }
    }

    /// Same policy with a different number of slots
    pub fn with_capacity(mut self, capacity: NonZeroU32) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for LotPolicy {
    fn default() -> Self {
        Self {
            name: default_lot_name(),
            capacity: DEFAULT_CAPACITY,
            pricing: PricingPolicy::default(),
            desk: DeskConfig::default(),
        }
    }
}

/// How departures are charged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingPolicy {
    /// `unit_rate` for every started `unit`
    PerStartedUnit { unit_rate: u64, unit: Duration },
    /// `amount` for any stay longer than zero seconds
    Flat { amount: u64 },
    /// Per started `unit`, rate depending on the vehicle category
    ByCategory { unit: Duration, rates: CategoryRates },
}

impl PricingPolicy {
    fn from_raw(raw: RawPricing) -> Self {
        match raw {
            RawPricing::PerStartedUnit {
                unit_rate,
                unit_seconds,
            } => Self::PerStartedUnit {
                unit_rate,
                unit: Duration::from_secs(unit_seconds),
            },
            RawPricing::Flat { amount } => Self::Flat { amount },
            RawPricing::ByCategory {
                unit_seconds,
                car,
                bike,
                truck,
            } => Self::ByCategory {
                unit: Duration::from_secs(unit_seconds),
                rates: CategoryRates { car, bike, truck },
            },
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::PerStartedUnit {
            unit_rate: DEFAULT_UNIT_RATE,
            unit: Duration::from_secs(60),
        }
    }
}

/// Unit rate for each vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRates {
    pub car: u64,
    pub bike: u64,
    pub truck: u64,
}

impl CategoryRates {
    pub fn rate_for(&self, category: VehicleCategory) -> u64 {
        match category {
            VehicleCategory::Car => self.car,
            VehicleCategory::Bike => self.bike,
            VehicleCategory::Truck => self.truck,
        }
    }
}

/// Front-desk display settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub currency: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn default_lot_name() -> String {
    "parking lot".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}
