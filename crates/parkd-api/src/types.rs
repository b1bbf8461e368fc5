//! Shared value types

use parkd_util::PlateNumber;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of vehicle. Carries no behaviour of its own; pricing may key on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Car,
    Bike,
    Truck,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 3] = [Self::Car, Self::Bike, Self::Truck];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known vehicle category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown vehicle category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for VehicleCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "bike" | "motorbike" => Ok(Self::Bike),
            "truck" => Ok(Self::Truck),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A vehicle arriving at the lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    plate: PlateNumber,
    category: VehicleCategory,
}

impl Vehicle {
    pub fn new(plate: impl Into<PlateNumber>, category: VehicleCategory) -> Self {
        Self {
            plate: plate.into(),
            category,
        }
    }

    pub fn car(plate: impl Into<PlateNumber>) -> Self {
        Self::new(plate, VehicleCategory::Car)
    }

    pub fn bike(plate: impl Into<PlateNumber>) -> Self {
        Self::new(plate, VehicleCategory::Bike)
    }

    pub fn truck(plate: impl Into<PlateNumber>) -> Self {
        Self::new(plate, VehicleCategory::Truck)
    }

    pub fn plate(&self) -> &PlateNumber {
        &self.plate
    }

    pub fn category(&self) -> VehicleCategory {
        self.category
    }
}

/// Occupancy state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Available,
    Occupied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing() {
        assert_eq!("car".parse::<VehicleCategory>().unwrap(), VehicleCategory::Car);
        assert_eq!("BIKE".parse::<VehicleCategory>().unwrap(), VehicleCategory::Bike);
        assert_eq!("Truck".parse::<VehicleCategory>().unwrap(), VehicleCategory::Truck);
        assert!("bus".parse::<VehicleCategory>().is_err());
    }

    #[test]
    fn category_display_round_trips() {
        for category in VehicleCategory::ALL {
            assert_eq!(category.to_string().parse::<VehicleCategory>().unwrap(), category);
        }
    }

    #[test]
    fn vehicle_constructors() {
        let car = Vehicle::car("KA-01-AA-1111");
        assert_eq!(car.plate().as_str(), "KA-01-AA-1111");
        assert_eq!(car.category(), VehicleCategory::Car);
        assert_eq!(Vehicle::bike("B").category(), VehicleCategory::Bike);
        assert_eq!(Vehicle::truck("T").category(), VehicleCategory::Truck);
    }

    #[test]
    fn vehicle_serializes_with_snake_case_category() {
        let json = serde_json::to_string(&Vehicle::truck("T-1")).unwrap();
        assert_eq!(json, r#"{"plate":"T-1","category":"truck"}"#);
    }
}
