//! Parking lot engine

use chrono::{DateTime, Local};
use parkd_api::Vehicle;
use parkd_config::LotPolicy;
use parkd_util::{
    Clock, LotError, LotId, LotResult, PlateNumber, SlotId, TicketId, whole_seconds_between,
};
use serde::Serialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{FeePolicy, Receipt, Slot, SlotView, Ticket, fee_policy_for};

/// Point-in-time summary of a lot
#[derive(Debug, Clone, Serialize)]
pub struct LotSnapshot {
    pub lot_id: LotId,
    pub name: String,
    pub capacity: usize,
    pub occupied: usize,
    /// Free slots, ascending
    pub available: Vec<SlotId>,
    /// Open tickets, oldest first
    pub active_tickets: Vec<Ticket>,
    pub taken_at: DateTime<Local>,
}

/// A single parking lot: a fixed row of slots plus the tickets currently open
/// on them.
///
/// Invariants:
/// - a plate holds at most one active ticket
/// - a slot is occupied iff exactly one active ticket points at it
/// - failed operations change nothing
pub struct ParkingLot {
    id: LotId,
    name: String,
    slots: Vec<Slot>,
    active: HashMap<PlateNumber, Ticket>,
    next_ticket: TicketId,
    fees: Arc<dyn FeePolicy>,
    clock: Arc<dyn Clock>,
}

impl ParkingLot {
    /// Create a lot with `capacity` slots numbered 1..=capacity, all available
    pub fn new(capacity: NonZeroU32, fees: Arc<dyn FeePolicy>, clock: Arc<dyn Clock>) -> Self {
        let slots = (1..=capacity.get()).map(|n| Slot::new(SlotId::new(n))).collect();
        let id = LotId::new();

        info!(lot_id = %id, capacity = capacity.get(), fees = ?fees, "Parking lot opened");

        Self {
            id,
            name: "parking lot".to_string(),
            slots,
            active: HashMap::new(),
            next_ticket: TicketId::new(1),
            fees,
            clock,
        }
    }

    /// Create a lot as described by a validated policy
    pub fn from_policy(policy: &LotPolicy, clock: Arc<dyn Clock>) -> Self {
        let mut lot = Self::new(policy.capacity, fee_policy_for(&policy.pricing), clock);
        lot.name = policy.name.clone();
        lot
    }

    pub fn id(&self) -> LotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.active.len()
    }

    /// Park a vehicle in the first available slot (lowest id).
    ///
    /// Fails with `DuplicateActiveSession` if the plate already holds a ticket,
    /// or `LotFull` if every slot is taken.
    pub fn park(&mut self, vehicle: Vehicle) -> LotResult<Ticket> {
        if let Some(existing) = self.active.get(vehicle.plate()) {
            warn!(
                lot_id = %self.id,
                plate = %vehicle.plate(),
                ticket_id = %existing.id,
                "Park rejected: plate already has an active ticket"
            );
            return Err(LotError::DuplicateActiveSession {
                plate: vehicle.plate().clone(),
                ticket_id: existing.id,
            });
        }

        let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_available()) else {
            warn!(lot_id = %self.id, plate = %vehicle.plate(), "Park rejected: lot full");
            return Err(LotError::LotFull);
        };

        let ticket = Ticket {
            id: self.next_ticket,
            plate: vehicle.plate().clone(),
            category: vehicle.category(),
            slot_id: slot.id(),
            entered_at: self.clock.now(),
        };
        self.next_ticket = self.next_ticket.next();

        slot.occupy(vehicle);
        self.active.insert(ticket.plate.clone(), ticket.clone());

        info!(
            lot_id = %self.id,
            ticket_id = %ticket.id,
            plate = %ticket.plate,
            category = %ticket.category,
            slot_id = %ticket.slot_id,
            "Vehicle parked"
        );

        Ok(ticket)
    }

    /// Check a vehicle out: close its ticket, free its slot and compute the fee.
    ///
    /// Fails with `NotFound` if the plate has no active ticket.
    pub fn unpark(&mut self, plate: &PlateNumber) -> LotResult<Receipt> {
        let Some(ticket) = self.active.remove(plate) else {
            warn!(lot_id = %self.id, plate = %plate, "Unpark rejected: no active ticket");
            return Err(LotError::NotFound(plate.clone()));
        };

        let exited_at = self.clock.now();
        let duration_secs = whole_seconds_between(&ticket.entered_at, &exited_at);
        let fee = self.fees.fee(ticket.category, duration_secs);

        let lot_id = self.id;
        match self.slot_mut(ticket.slot_id) {
            Some(slot) => {
                let left = slot.release();
                let matches_ticket = left.as_ref().map(Vehicle::plate) == Some(&ticket.plate);
                if !matches_ticket {
                    warn!(
                        lot_id = %lot_id,
                        slot_id = %ticket.slot_id,
                        plate = %ticket.plate,
                        occupant = ?left,
                        "Slot occupant did not match the closed ticket"
                    );
                }
                debug_assert!(
                    matches_ticket,
                    "slot {} held {:?} for ticket {}",
                    ticket.slot_id,
                    left,
                    ticket.id
                );
            }
            None => warn!(
                lot_id = %lot_id,
                slot_id = %ticket.slot_id,
                "Ticket points at a slot outside this lot"
            ),
        }

        info!(
            lot_id = %self.id,
            ticket_id = %ticket.id,
            plate = %ticket.plate,
            slot_id = %ticket.slot_id,
            duration_secs,
            fee,
            "Vehicle unparked"
        );

        Ok(Receipt {
            ticket,
            exited_at,
            duration_secs,
            fee,
        })
    }

    /// Ids of unoccupied slots, ascending
    pub fn list_available(&self) -> Vec<SlotId> {
        let available: Vec<SlotId> = self
            .slots
            .iter()
            .filter(|slot| slot.is_available())
            .map(Slot::id)
            .collect();

        debug!(lot_id = %self.id, available = available.len(), "Listed available slots");

        available
    }

    /// The open ticket for a plate, if any
    pub fn active_ticket(&self, plate: &PlateNumber) -> Option<&Ticket> {
        self.active.get(plate)
    }

    /// All open tickets, oldest first
    pub fn active_tickets(&self) -> Vec<&Ticket> {
        let mut tickets: Vec<&Ticket> = self.active.values().collect();
        tickets.sort_by_key(|ticket| ticket.id);
        tickets
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_views(&self) -> Vec<SlotView> {
        self.slots.iter().map(Slot::to_view).collect()
    }

    pub fn snapshot(&self) -> LotSnapshot {
        LotSnapshot {
            lot_id: self.id,
            name: self.name.clone(),
            capacity: self.capacity(),
            occupied: self.occupied_count(),
            available: self.list_available(),
            active_tickets: self.active_tickets().into_iter().cloned().collect(),
            taken_at: self.clock.now(),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.slots.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PerStartedUnit;
    use parkd_api::SlotState;
    use parkd_config::PricingPolicy;
    use parkd_util::ManualClock;
    use std::time::Duration;

    fn make_lot(capacity: u32) -> (ParkingLot, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let lot = ParkingLot::new(
            NonZeroU32::new(capacity).unwrap(),
            Arc::new(PerStartedUnit::per_minute(10)),
            clock.clone(),
        );
        (lot, clock)
    }

    fn slots(ids: &[u32]) -> Vec<SlotId> {
        ids.iter().copied().map(SlotId::new).collect()
    }

    #[test]
    fn test_new_lot_is_empty() {
        let (lot, _) = make_lot(5);
        assert_eq!(lot.capacity(), 5);
        assert_eq!(lot.occupied_count(), 0);
        assert_eq!(lot.list_available(), slots(&[1, 2, 3, 4, 5]));
        assert!(lot.slots().iter().all(|s| s.state() == SlotState::Available));
    }

    #[test]
    fn test_front_desk_scenario() {
        let (mut lot, clock) = make_lot(5);

        let t1 = lot.park(Vehicle::car("AA-1")).unwrap();
        assert_eq!(t1.slot_id, SlotId::new(1));

        clock.advance(Duration::from_secs(2));
        let t2 = lot.park(Vehicle::bike("BB-2")).unwrap();
        assert_eq!(t2.slot_id, SlotId::new(2));

        assert_eq!(lot.list_available(), slots(&[3, 4, 5]));

        let r1 = lot.unpark(&"AA-1".into()).unwrap();
        assert_eq!(r1.duration_secs, 2);
        assert_eq!(r1.fee, 10);

        let r2 = lot.unpark(&"BB-2".into()).unwrap();
        assert_eq!(r2.duration_secs, 0);
        assert_eq!(r2.fee, 0);

        assert_eq!(lot.list_available(), slots(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_full_lot_rejects_and_changes_nothing() {
        for capacity in 1..=6 {
            let (mut lot, _) = make_lot(capacity);
            for n in 0..capacity {
                lot.park(Vehicle::car(format!("CAR-{n}"))).unwrap();
            }
            let before = lot.slot_views();

            let result = lot.park(Vehicle::car("ONE-TOO-MANY"));
            assert_eq!(result, Err(LotError::LotFull));

            assert_eq!(lot.slot_views(), before);
            assert_eq!(lot.occupied_count(), capacity as usize);
            assert!(lot.active_ticket(&"ONE-TOO-MANY".into()).is_none());
            assert!(lot.list_available().is_empty());
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "slot 1 held None for ticket 1")]
    fn test_unpark_catches_slot_out_of_sync_with_ticket() {
        let (mut lot, _) = make_lot(2);
        lot.park(Vehicle::car("X")).unwrap();

        lot.slots[0].release();
        let _ = lot.unpark(&"X".into());
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let (mut lot, _) = make_lot(1);

        let x = lot.park(Vehicle::car("X")).unwrap();
        assert_eq!(x.slot_id, SlotId::new(1));
        assert_eq!(lot.park(Vehicle::car("Y")), Err(LotError::LotFull));

        lot.unpark(&"X".into()).unwrap();
        let y = lot.park(Vehicle::car("Y")).unwrap();
        assert_eq!(y.slot_id, SlotId::new(1));
    }

    #[test]
    fn test_first_free_slot_wins() {
        let (mut lot, _) = make_lot(4);
        for plate in ["A", "B", "C", "D"] {
            lot.park(Vehicle::car(plate)).unwrap();
        }
        lot.unpark(&"C".into()).unwrap();
        lot.unpark(&"B".into()).unwrap();

        assert_eq!(lot.list_available(), slots(&[2, 3]));
        assert_eq!(lot.park(Vehicle::car("E")).unwrap().slot_id, SlotId::new(2));
        assert_eq!(lot.park(Vehicle::car("F")).unwrap().slot_id, SlotId::new(3));
    }

    #[test]
    fn test_duplicate_plate_rejected() {
        let (mut lot, _) = make_lot(3);

        let first = lot.park(Vehicle::car("DUP")).unwrap();
        let result = lot.park(Vehicle::truck("DUP"));
        assert_eq!(
            result,
            Err(LotError::DuplicateActiveSession {
                plate: "DUP".into(),
                ticket_id: first.id,
            })
        );

        assert_eq!(lot.active_ticket(&"DUP".into()), Some(&first));
        assert_eq!(lot.occupied_count(), 1);
        assert_eq!(lot.list_available(), slots(&[2, 3]));
    }

    #[test]
    fn test_duplicate_reported_even_when_full() {
        let (mut lot, _) = make_lot(1);
        lot.park(Vehicle::car("ONLY")).unwrap();

        let result = lot.park(Vehicle::car("ONLY"));
        assert!(matches!(result, Err(LotError::DuplicateActiveSession { .. })));
    }

    #[test]
    fn test_unpark_unknown_plate() {
        let (mut lot, _) = make_lot(2);
        lot.park(Vehicle::car("KNOWN")).unwrap();
        let before = lot.slot_views();

        let result = lot.unpark(&"GHOST".into());
        assert_eq!(result, Err(LotError::NotFound("GHOST".into())));
        assert_eq!(lot.slot_views(), before);
        assert!(lot.active_ticket(&"KNOWN".into()).is_some());
    }

    #[test]
    fn test_second_unpark_is_not_found() {
        let (mut lot, _) = make_lot(2);
        lot.park(Vehicle::car("ONCE")).unwrap();

        assert!(lot.unpark(&"ONCE".into()).is_ok());
        assert_eq!(
            lot.unpark(&"ONCE".into()),
            Err(LotError::NotFound("ONCE".into()))
        );
    }

    #[test]
    fn test_ticket_ids_increase_and_skip_nothing_on_failure() {
        let (mut lot, _) = make_lot(2);

        let a = lot.park(Vehicle::car("A")).unwrap();
        let b = lot.park(Vehicle::car("B")).unwrap();
        assert!(lot.park(Vehicle::car("C")).is_err());
        lot.unpark(&"A".into()).unwrap();
        let c = lot.park(Vehicle::car("C")).unwrap();

        assert_eq!(a.id, TicketId::new(1));
        assert_eq!(b.id, TicketId::new(2));
        assert_eq!(c.id, TicketId::new(3));
    }

    #[test]
    fn test_lots_number_tickets_independently() {
        let (mut first, _) = make_lot(2);
        let (mut second, _) = make_lot(2);

        first.park(Vehicle::car("A")).unwrap();
        let t = second.park(Vehicle::car("A")).unwrap();

        assert_eq!(t.id, TicketId::new(1));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_clock_going_backwards_bills_zero() {
        let (mut lot, clock) = make_lot(1);
        lot.park(Vehicle::car("A")).unwrap();

        clock.set(clock.now() - chrono::Duration::seconds(30));
        let receipt = lot.unpark(&"A".into()).unwrap();
        assert_eq!(receipt.duration_secs, 0);
        assert_eq!(receipt.fee, 0);
    }

    #[test]
    fn test_long_stay_fee() {
        let (mut lot, clock) = make_lot(1);
        lot.park(Vehicle::truck("LONG")).unwrap();

        clock.advance(Duration::from_secs(61 * 60 + 1));
        let receipt = lot.unpark(&"LONG".into()).unwrap();
        assert_eq!(receipt.duration(), Duration::from_secs(3661));
        assert_eq!(receipt.fee, 620);
        assert_eq!(receipt.slot_id(), SlotId::new(1));
    }

    #[test]
    fn test_ticket_records_vehicle_and_time() {
        let (mut lot, clock) = make_lot(3);
        let entered = clock.now();

        let ticket = lot.park(Vehicle::bike("BB-2")).unwrap();
        assert_eq!(ticket.plate.as_str(), "BB-2");
        assert_eq!(ticket.category, parkd_api::VehicleCategory::Bike);
        assert_eq!(ticket.entered_at, entered);

        let view = &lot.slot_views()[0];
        assert_eq!(view.occupant, Some(Vehicle::bike("BB-2")));
    }

    #[test]
    fn test_snapshot() {
        let (mut lot, _) = make_lot(3);
        lot.park(Vehicle::car("A")).unwrap();
        lot.park(Vehicle::car("B")).unwrap();
        lot.unpark(&"A".into()).unwrap();
        lot.park(Vehicle::car("C")).unwrap();

        let snapshot = lot.snapshot();
        assert_eq!(snapshot.capacity, 3);
        assert_eq!(snapshot.occupied, 2);
        assert_eq!(snapshot.available, slots(&[3]));

        let plates: Vec<&str> = snapshot
            .active_tickets
            .iter()
            .map(|t| t.plate.as_str())
            .collect();
        assert_eq!(plates, vec!["B", "C"]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["available"], serde_json::json!([3]));
        assert_eq!(json["active_tickets"][0]["category"], "car");
    }

    #[test]
    fn test_from_policy() {
        let policy = LotPolicy {
            name: "Depot".into(),
            pricing: PricingPolicy::Flat { amount: 40 },
            ..LotPolicy::default()
        }
        .with_capacity(NonZeroU32::new(2).unwrap());

        let clock = Arc::new(ManualClock::starting_now());
        let mut lot = ParkingLot::from_policy(&policy, clock.clone());
        assert_eq!(lot.name(), "Depot");
        assert_eq!(lot.capacity(), 2);

        lot.park(Vehicle::car("A")).unwrap();
        clock.advance(Duration::from_secs(5000));
        assert_eq!(lot.unpark(&"A".into()).unwrap().fee, 40);
    }
}
