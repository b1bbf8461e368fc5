//! Strongly-typed identifiers for parkd

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Registration plate of a vehicle; the key of an active parking session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlateNumber(String);

impl PlateNumber {
    pub fn new(plate: impl Into<String>) -> Self {
        Self(plate.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlateNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlateNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Number of a physical parking space. Slots are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket number, issued in increasing order by a single lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(u64);

impl TicketId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id issued after this one
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a lot instance, used to tell lots apart in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LotId(Uuid);

impl LotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_equality() {
        let p1 = PlateNumber::new("KA-01-AA-1111");
        let p2 = PlateNumber::from("KA-01-AA-1111");
        let p3 = PlateNumber::new("KA-02-BB-2222");

        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }

    #[test]
    fn ticket_id_next() {
        let first = TicketId::new(1);
        assert_eq!(first.next(), TicketId::new(2));
        assert_eq!(TicketId::new(u64::MAX).next(), TicketId::new(u64::MAX));
    }

    #[test]
    fn lot_id_uniqueness() {
        assert_ne!(LotId::new(), LotId::new());
    }

    #[test]
    fn ids_serialize_deserialize() {
        let plate = PlateNumber::new("AA-1");
        let json = serde_json::to_string(&plate).unwrap();
        assert_eq!(json, "\"AA-1\"");
        let parsed: PlateNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(plate, parsed);

        let slot = SlotId::new(3);
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "3");

        let lot = LotId::new();
        let json = serde_json::to_string(&lot).unwrap();
        let parsed: LotId = serde_json::from_str(&json).unwrap();
        assert_eq!(lot, parsed);
    }
}
