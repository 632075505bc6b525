//! A floor: the unit of physical grouping and allocation scan scope.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::catalog::SpotCategory;
use crate::core::spot::{Spot, SpotId};
use crate::core::ticket::TicketId;
use crate::core::ParkingError;

/// Floor identifier, unique within the lot.
pub type FloorId = String;

/// Free/occupied counters for one category on one floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Spots without a ticket.
    pub free: usize,
    /// Spots held by a ticket.
    pub occupied: usize,
}

/// A floor owning its spots, grouped per category in registration order.
#[derive(Debug)]
pub struct Floor {
    id: FloorId,
    spots: BTreeMap<SpotCategory, Vec<Spot>>,
    index: HashMap<SpotId, (SpotCategory, usize)>,
}

impl Floor {
    /// Create an empty floor.
    pub fn new(id: impl Into<FloorId>) -> Self {
        Self {
            id: id.into(),
            spots: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Register a spot at the end of its category's scan order.
    ///
    /// Only available while the floor is being assembled; once handed to a
    /// [`Lot`](crate::core::Lot) the spot set is fixed.
    pub fn add_spot(
        &mut self,
        id: impl Into<SpotId>,
        category: SpotCategory,
    ) -> Result<(), ParkingError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(ParkingError::Config(format!(
                "floor `{}` registers spot `{id}` twice",
                self.id
            )));
        }
        let list = self.spots.entry(category).or_default();
        self.index.insert(id.clone(), (category, list.len()));
        list.push(Spot::new(id, category));
        Ok(())
    }

    /// Floor identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total number of spots.
    pub fn capacity(&self) -> usize {
        self.index.len()
    }

    /// Look up a spot by id.
    pub fn spot(&self, spot_id: &str) -> Option<&Spot> {
        let (category, pos) = self.index.get(spot_id)?;
        self.spots.get(category).and_then(|list| list.get(*pos))
    }

    /// Spots of one category in scan order.
    pub fn spots_of(&self, category: SpotCategory) -> &[Spot] {
        self.spots
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Claim the first free spot of `category` for `ticket_id`.
    ///
    /// First-fit in registration order. `None` means every spot of that
    /// category is taken and the caller should move on.
    pub fn try_allocate(&self, category: SpotCategory, ticket_id: &str) -> Option<&Spot> {
        let found = self
            .spots_of(category)
            .iter()
            .find(|spot| spot.claim(ticket_id).is_ok());
        tracing::debug!(
            floor = %self.id,
            category = category.label(),
            hit = found.is_some(),
            "floor scan"
        );
        found
    }

    /// Free a spot on this floor, returning the ticket that held it.
    pub fn release(&self, spot_id: &str) -> Result<TicketId, ParkingError> {
        self.spot(spot_id)
            .ok_or_else(|| ParkingError::SpotNotFound(spot_id.to_owned()))?
            .release()
    }

    /// Free a spot on this floor on behalf of the ticket holding it.
    pub fn release_held(&self, spot_id: &str, ticket_id: &str) -> Result<(), ParkingError> {
        self.spot(spot_id)
            .ok_or_else(|| ParkingError::SpotNotFound(spot_id.to_owned()))?
            .release_held(ticket_id)
    }

    /// Per-category occupancy counters.
    ///
    /// Every [`SpotCategory`] is present; categories without spots on this
    /// floor report zero free and zero occupied.
    pub fn occupancy(&self) -> BTreeMap<SpotCategory, Occupancy> {
        SpotCategory::ALL
            .into_iter()
            .map(|category| {
                let list = self.spots_of(category);
                let occupied = list.iter().filter(|s| !s.is_free()).count();
                (
                    category,
                    Occupancy {
                        free: list.len() - occupied,
                        occupied,
                    },
                )
            })
            .collect()
    }
}
