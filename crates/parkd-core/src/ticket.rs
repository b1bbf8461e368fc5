//! Tickets and checkout receipts

use chrono::{DateTime, Local};
use parkd_api::VehicleCategory;
use parkd_util::{PlateNumber, SlotId, TicketId};
use serde::Serialize;
use std::time::Duration;

/// Record of one parking session's start. Never changes once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub plate: PlateNumber,
    pub category: VehicleCategory,
    pub slot_id: SlotId,
    pub entered_at: DateTime<Local>,
}

/// Result of a successful checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// The ticket that was closed
    pub ticket: Ticket,

    pub exited_at: DateTime<Local>,

    /// Whole seconds parked
    pub duration_secs: u64,

    /// Amount charged, in currency units
    pub fee: u64,
}

impl Receipt {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn slot_id(&self) -> SlotId {
        self.ticket.slot_id
    }
}
