//! Vehicle and spot taxonomy plus the compatibility table between them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::ParkingError;

/// Category of an arriving vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    /// Standard passenger car.
    Car,
    /// Truck or van.
    Truck,
    /// Electric car, prefers charging spots.
    ElectricCar,
    /// Motorbike or scooter.
    Motorbike,
}

impl VehicleCategory {
    /// Every vehicle category, in declaration order.
    pub const ALL: [Self; 4] = [Self::Car, Self::Truck, Self::ElectricCar, Self::Motorbike];
}

/// Category of a physical spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotCategory {
    /// Accessible spot.
    Disabled,
    /// Compact car spot.
    Compact,
    /// Large vehicle spot.
    Large,
    /// Motorcycle bay.
    Motorcycle,
    /// Spot with a charging point.
    ElectricCar,
}

impl SpotCategory {
    /// Every spot category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Disabled,
        Self::Compact,
        Self::Large,
        Self::Motorcycle,
        Self::ElectricCar,
    ];

    /// Lowercase label used in generated spot ids and log fields.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Compact => "compact",
            Self::Large => "large",
            Self::Motorcycle => "motorcycle",
            Self::ElectricCar => "electric_car",
        }
    }
}

/// A vehicle presented at an entry gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Registration number.
    pub id: String,
    /// Vehicle category.
    pub category: VehicleCategory,
}

impl Vehicle {
    /// Create a vehicle.
    pub fn new(id: impl Into<String>, category: VehicleCategory) -> Self {
        Self {
            id: id.into(),
            category,
        }
    }
}

/// Ordered list of acceptable spot categories per vehicle category.
///
/// The first entry is the primary match; the rest are fallbacks tried in order.
/// Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityMap {
    entries: BTreeMap<VehicleCategory, Vec<SpotCategory>>,
}

impl CompatibilityMap {
    /// Validate and build a compatibility map.
    ///
    /// Every vehicle category must map to a non-empty list without repeats.
    pub fn new(entries: BTreeMap<VehicleCategory, Vec<SpotCategory>>) -> Result<Self, ParkingError> {
        for vehicle in VehicleCategory::ALL {
            let Some(list) = entries.get(&vehicle) else {
                return Err(ParkingError::Config(format!(
                    "compatibility map has no entry for {vehicle:?}"
                )));
            };
            if list.is_empty() {
                return Err(ParkingError::Config(format!(
                    "compatibility list for {vehicle:?} is empty"
                )));
            }
            let mut seen = BTreeSet::new();
            if let Some(dup) = list.iter().find(|c| !seen.insert(**c)) {
                return Err(ParkingError::Config(format!(
                    "compatibility list for {vehicle:?} repeats {dup:?}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Acceptable spot categories for the vehicle, primary match first.
    pub fn acceptable(&self, vehicle: VehicleCategory) -> &[SpotCategory] {
        // Construction guarantees every category has an entry.
        self.entries
            .get(&vehicle)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over all entries in category order.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleCategory, &[SpotCategory])> {
        self.entries.iter().map(|(v, list)| (*v, list.as_slice()))
    }
}

impl Default for CompatibilityMap {
    fn default() -> Self {
        use SpotCategory as S;
        let entries = BTreeMap::from([
            (VehicleCategory::Car, vec![S::Compact, S::Large]),
            (VehicleCategory::Truck, vec![S::Large]),
            (VehicleCategory::ElectricCar, vec![S::ElectricCar, S::Compact, S::Large]),
            (VehicleCategory::Motorbike, vec![S::Motorcycle, S::Compact]),
        ]);
        Self { entries }
    }
}
