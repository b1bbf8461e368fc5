//! Core lot engine for parkd
//!
//! This crate is the heart of parkd, containing:
//! - Slot allocation (first free slot in ascending order)
//! - Ticket lifecycle (park -> active -> checked out)
//! - Fee policies, injectable per lot
//! - A lock-guarded handle for sharing one lot between threads

mod fee;
mod lot;
mod shared;
mod slot;
mod ticket;

pub use fee::*;
pub use lot::*;
pub use shared::*;
pub use slot::*;
pub use ticket::*;
