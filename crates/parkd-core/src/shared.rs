//! Thread-safe handle to a lot
//!
//! Every operation takes the same lock, so the first-free-slot scan and the
//! slot claim happen as one step and a checkout can never interleave with a
//! park of the same plate.

use parkd_api::Vehicle;
use parkd_util::{LotResult, PlateNumber, SlotId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{LotSnapshot, ParkingLot, Receipt, Ticket};

/// Cloneable, lock-guarded [`ParkingLot`]
#[derive(Clone)]
pub struct SharedLot {
    inner: Arc<Mutex<ParkingLot>>,
}

impl SharedLot {
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lot)),
        }
    }

    pub fn park(&self, vehicle: Vehicle) -> LotResult<Ticket> {
        self.lock().park(vehicle)
    }

    pub fn unpark(&self, plate: &PlateNumber) -> LotResult<Receipt> {
        self.lock().unpark(plate)
    }

    pub fn list_available(&self) -> Vec<SlotId> {
        self.lock().list_available()
    }

    pub fn active_ticket(&self, plate: &PlateNumber) -> Option<Ticket> {
        self.lock().active_ticket(plate).cloned()
    }

    pub fn snapshot(&self) -> LotSnapshot {
        self.lock().snapshot()
    }

    /// Run several operations under one lock acquisition
    pub fn with<R>(&self, f: impl FnOnce(&mut ParkingLot) -> R) -> R {
        f(&mut *self.lock())
    }

    // The lot validates before it mutates, so a panic elsewhere while the lock
    // was held cannot have left it half-updated.
    fn lock(&self) -> MutexGuard<'_, ParkingLot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
