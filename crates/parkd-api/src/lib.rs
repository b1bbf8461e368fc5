//! Shared types for parkd
//!
//! This crate defines the values exchanged between the lot and its callers:
//! - Vehicles and their categories
//! - Slot states
//! - The front-desk command language

mod commands;
mod types;

pub use commands::*;
pub use types::*;
