//! Error types for lot operations

use thiserror::Error;

use crate::{PlateNumber, TicketId};

/// Expected, recoverable outcomes of park and unpark.
///
/// Every failing operation leaves the lot exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    #[error("Parking lot full")]
    LotFull,

    #[error("Vehicle {plate} already holds active ticket {ticket_id}")]
    DuplicateActiveSession {
        plate: PlateNumber,
        ticket_id: TicketId,
    },

    #[error("Vehicle not found: {0}")]
    NotFound(PlateNumber),
}

impl LotError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::LotFull => "LOT_FULL",
            Self::DuplicateActiveSession { .. } => "DUPLICATE_ACTIVE_SESSION",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

pub type LotResult<T> = std::result::Result<T, LotError>;
