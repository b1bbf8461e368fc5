//! Configuration validation

use crate::schema::{RawConfig, RawPricing};
use thiserror::Error;

/// Largest number of slots a single lot may have
pub const MAX_CAPACITY: u32 = 100_000;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Lot capacity {capacity} is out of range (1..={max})")]
    CapacityOutOfRange { capacity: u64, max: u32 },

    #[error("Lot name cannot be empty")]
    EmptyLotName,

    #[error("Pricing: unit_seconds must be at least 1")]
    ZeroBillingUnit,

    #[error("Desk: currency cannot be empty")]
    EmptyCurrency,
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(err) = check_capacity(config.lot.capacity) {
        errors.push(err);
    }

    if let Some(name) = &config.lot.name
        && name.trim().is_empty()
    {
        errors.push(ValidationError::EmptyLotName);
    }

    if let Some(pricing) = &config.pricing {
        errors.extend(validate_pricing(pricing));
    }

    if let Some(currency) = &config.desk.currency
        && currency.trim().is_empty()
    {
        errors.push(ValidationError::EmptyCurrency);
    }

    errors
}

/// Check a slot count against `1..=MAX_CAPACITY`.
///
/// Shared by the config file and command-line overrides.
pub fn check_capacity(capacity: u64) -> Result<(), ValidationError> {
    if capacity == 0 || capacity > u64::from(MAX_CAPACITY) {
        return Err(ValidationError::CapacityOutOfRange {
            capacity,
            max: MAX_CAPACITY,
        });
    }
    Ok(())
}

fn validate_pricing(pricing: &RawPricing) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match pricing {
        RawPricing::PerStartedUnit { unit_seconds, .. }
        | RawPricing::ByCategory { unit_seconds, .. } => {
            if *unit_seconds == 0 {
                errors.push(ValidationError::ZeroBillingUnit);
            }
        }
        // Any amount is fine, including free parking
        RawPricing::Flat { .. } => {}
    }

    errors
}
