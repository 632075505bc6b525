//! The lot: single allocation authority over all floors.
//!
//! The floor and spot collections are fixed once the lot is built, so the lot
//! itself needs no lock. Only per-spot occupancy changes at request time, and
//! only through [`Floor::try_allocate`] and [`Floor::release`]. A scan never
//! holds more than one spot lock at a time.
//!
//! Share one lot between gateways with `Arc<Lot>`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::catalog::{CompatibilityMap, SpotCategory, VehicleCategory};
use crate::core::floor::{Floor, FloorId, Occupancy};
use crate::core::spot::SpotId;
use crate::core::ticket::TicketId;
use crate::core::ParkingError;

/// Result of a successful acquire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Floor holding the spot.
    pub floor_id: FloorId,
    /// Claimed spot.
    pub spot_id: SpotId,
    /// Category of the claimed spot.
    pub category: SpotCategory,
}

/// Read-only occupancy view: floor id, then category, then counters.
///
/// Every floor lists every spot category, with zeroes where it has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSnapshot {
    /// Counters per floor and category.
    pub floors: BTreeMap<FloorId, BTreeMap<SpotCategory, Occupancy>>,
}

impl LotSnapshot {
    /// Occupied spots across the whole lot.
    pub fn occupied(&self) -> usize {
        self.floors
            .values()
            .flat_map(BTreeMap::values)
            .map(|o| o.occupied)
            .sum()
    }

    /// Free spots across the whole lot.
    pub fn free(&self) -> usize {
        self.floors
            .values()
            .flat_map(BTreeMap::values)
            .map(|o| o.free)
            .sum()
    }
}

/// The allocator owning every floor.
#[derive(Debug)]
pub struct Lot {
    floors: Vec<Floor>,
    floor_index: HashMap<FloorId, usize>,
    compatibility: CompatibilityMap,
}

impl Lot {
    /// Build a lot from floors in scan order.
    pub fn new(floors: Vec<Floor>, compatibility: CompatibilityMap) -> Result<Self, ParkingError> {
        let mut floor_index = HashMap::with_capacity(floors.len());
        for (pos, floor) in floors.iter().enumerate() {
            if floor_index.insert(floor.id().to_owned(), pos).is_some() {
                return Err(ParkingError::Config(format!(
                    "floor `{}` registered twice",
                    floor.id()
                )));
            }
        }
        tracing::info!(
            floors = floors.len(),
            capacity = floors.iter().map(Floor::capacity).sum::<usize>(),
            "lot initialized"
        );
        Ok(Self {
            floors,
            floor_index,
            compatibility,
        })
    }

    /// Claim a spot for a vehicle of `vehicle` category on behalf of `ticket_id`.
    ///
    /// Tries each acceptable spot category in preference order and, for each,
    /// every floor in registration order. The first successful claim wins.
    pub fn acquire(
        &self,
        vehicle: VehicleCategory,
        ticket_id: &str,
    ) -> Result<Allocation, ParkingError> {
        for &category in self.compatibility.acceptable(vehicle) {
            for floor in &self.floors {
                if let Some(spot) = floor.try_allocate(category, ticket_id) {
                    return Ok(Allocation {
                        floor_id: floor.id().to_owned(),
                        spot_id: spot.id().to_owned(),
                        category,
                    });
                }
            }
        }
        Err(ParkingError::NoSpotAvailable)
    }

    /// Free a spot, returning the ticket that held it.
    pub fn release(&self, floor_id: &str, spot_id: &str) -> Result<TicketId, ParkingError> {
        let invalid = || ParkingError::InvalidSpotReference {
            floor_id: floor_id.to_owned(),
            spot_id: spot_id.to_owned(),
        };
        let floor = self.floor(floor_id).ok_or_else(invalid)?;
        floor.release(spot_id).map_err(|e| match e {
            ParkingError::SpotNotFound(_) => invalid(),
            other => other,
        })
    }

    /// Free a spot on behalf of the ticket holding it.
    ///
    /// Fails with `HeldByOtherTicket` and leaves the spot occupied when a
    /// different ticket holds it.
    pub fn release_held(
        &self,
        floor_id: &str,
        spot_id: &str,
        ticket_id: &str,
    ) -> Result<(), ParkingError> {
        let invalid = || ParkingError::InvalidSpotReference {
            floor_id: floor_id.to_owned(),
            spot_id: spot_id.to_owned(),
        };
        let floor = self.floor(floor_id).ok_or_else(invalid)?;
        floor.release_held(spot_id, ticket_id).map_err(|e| match e {
            ParkingError::SpotNotFound(_) => invalid(),
            other => other,
        })
    }

    /// Look up a floor by id.
    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floor_index.get(floor_id).map(|pos| &self.floors[*pos])
    }

    /// Floors in scan order.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Compatibility table used by `acquire`.
    pub const fn compatibility(&self) -> &CompatibilityMap {
        &self.compatibility
    }

    /// Total number of spots.
    pub fn capacity(&self) -> usize {
        self.floors.iter().map(Floor::capacity).sum()
    }

    /// Number of occupied spots right now.
    pub fn occupied_count(&self) -> usize {
        self.floors
            .iter()
            .flat_map(|f| f.occupancy().into_values())
            .map(|o| o.occupied)
            .sum()
    }

    /// Occupancy counters per floor and category.
    ///
    /// Each spot is read under its own lock; under concurrent traffic the
    /// result is not a single atomic cut across the lot.
    pub fn snapshot(&self) -> LotSnapshot {
        LotSnapshot {
            floors: self
                .floors
                .iter()
                .map(|f| (f.id().to_owned(), f.occupancy()))
                .collect(),
        }
    }
}
