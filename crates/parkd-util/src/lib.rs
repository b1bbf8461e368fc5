//! Shared utilities for parkd
//!
//! This crate provides:
//! - ID types (PlateNumber, SlotId, TicketId, LotId)
//! - Time utilities (injectable clocks, duration helpers)
//! - Error types
//! - Default paths for the config file

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
