//! Fee policies
//!
//! A fee policy maps a finished stay to an amount. Policies are pure: the same
//! category and duration always produce the same fee, and a longer stay never
//! costs less than a shorter one.

use parkd_api::VehicleCategory;
use parkd_config::{CategoryRates, PricingPolicy};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Pricing applied at checkout
pub trait FeePolicy: Send + Sync + fmt::Debug {
    /// Amount owed for a stay of `duration_secs` whole seconds
    fn fee(&self, category: VehicleCategory, duration_secs: u64) -> u64;
}

/// Number of billing units started during `duration_secs`
fn started_units(duration_secs: u64, unit_secs: u64) -> u64 {
    duration_secs.div_ceil(unit_secs.max(1))
}

/// `unit_rate` for every started unit; zero seconds costs nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerStartedUnit {
    unit_rate: u64,
    unit_secs: u64,
}

impl PerStartedUnit {
    /// Units shorter than one second are billed as one second
    pub fn new(unit_rate: u64, unit: Duration) -> Self {
        Self {
            unit_rate,
            unit_secs: unit.as_secs().max(1),
        }
    }

    pub fn per_minute(unit_rate: u64) -> Self {
        Self::new(unit_rate, Duration::from_secs(60))
    }
}

impl Default for PerStartedUnit {
    fn default() -> Self {
        Self::per_minute(parkd_config::DEFAULT_UNIT_RATE)
    }
}

impl FeePolicy for PerStartedUnit {
    fn fee(&self, _category: VehicleCategory, duration_secs: u64) -> u64 {
        started_units(duration_secs, self.unit_secs).saturating_mul(self.unit_rate)
    }
}

/// Same amount for any stay longer than zero seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRate {
    amount: u64,
}

impl FlatRate {
    pub fn new(amount: u64) -> Self {
        Self { amount }
    }
}

impl FeePolicy for FlatRate {
    fn fee(&self, _category: VehicleCategory, duration_secs: u64) -> u64 {
        if duration_secs == 0 { 0 } else { self.amount }
    }
}

/// Per started unit, with the rate chosen by vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByCategory {
    unit_secs: u64,
    rates: CategoryRates,
}

impl ByCategory {
    pub fn new(unit: Duration, rates: CategoryRates) -> Self {
        Self {
            unit_secs: unit.as_secs().max(1),
            rates,
        }
    }
}

impl FeePolicy for ByCategory {
    fn fee(&self, category: VehicleCategory, duration_secs: u64) -> u64 {
        started_units(duration_secs, self.unit_secs).saturating_mul(self.rates.rate_for(category))
    }
}

/// Build the fee policy described by configuration
pub fn fee_policy_for(pricing: &PricingPolicy) -> Arc<dyn FeePolicy> {
    match pricing {
        PricingPolicy::PerStartedUnit { unit_rate, unit } => {
            Arc::new(PerStartedUnit::new(*unit_rate, *unit))
        }
        PricingPolicy::Flat { amount } => Arc::new(FlatRate::new(*amount)),
        PricingPolicy::ByCategory { unit, rates } => Arc::new(ByCategory::new(*unit, *rates)),
    }
}
