//! Slot state machine
//!
//! A slot is AVAILABLE while it has no occupant and OCCUPIED while it has one.
//! Only the lot moves a slot between the two states.

use parkd_api::{SlotState, Vehicle};
use parkd_util::SlotId;
use serde::Serialize;

/// One physical parking space
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    occupant: Option<Vehicle>,
}

impl Slot {
    pub fn new(id: SlotId) -> Self {
        Self { id, occupant: None }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn state(&self) -> SlotState {
        if self.is_available() {
            SlotState::Available
        } else {
            SlotState::Occupied
        }
    }

    /// AVAILABLE -> OCCUPIED
    pub(crate) fn occupy(&mut self, vehicle: Vehicle) {
        debug_assert!(self.is_available(), "slot {} already occupied", self.id);
        self.occupant = Some(vehicle);
    }

    /// OCCUPIED -> AVAILABLE, returning the vehicle that left
    pub(crate) fn release(&mut self) -> Option<Vehicle> {
        self.occupant.take()
    }

    pub fn to_view(&self) -> SlotView {
        SlotView {
            slot_id: self.id,
            state: self.state(),
            occupant: self.occupant.clone(),
        }
    }
}

/// Read-only view of a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub slot_id: SlotId,
    pub state: SlotState,
    pub occupant: Option<Vehicle>,
}
