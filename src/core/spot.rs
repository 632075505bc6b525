//! The atomic allocatable unit.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::catalog::SpotCategory;
use crate::core::ticket::TicketId;
use crate::core::ParkingError;

/// Spot identifier, unique within its floor.
pub type SpotId = String;

/// Occupancy state of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotState {
    /// No ticket holds the spot.
    Free,
    /// A ticket holds the spot.
    Occupied,
}

/// One physical parking spot.
///
/// The occupant lives behind its own `parking_lot::Mutex`, so `claim` and
/// `release` are single critical sections of O(1) work. The spot is occupied
/// exactly when an occupant ticket id is present.
#[derive(Debug)]
pub struct Spot {
    id: SpotId,
    category: SpotCategory,
    occupant: Mutex<Option<TicketId>>,
}

impl Spot {
    pub(crate) fn new(id: impl Into<SpotId>, category: SpotCategory) -> Self {
        Self {
            id: id.into(),
            category,
            occupant: Mutex::new(None),
        }
    }

    /// Spot identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Spot category.
    pub const fn category(&self) -> SpotCategory {
        self.category
    }

    /// Current occupancy state.
    pub fn state(&self) -> SpotState {
        if self.occupant.lock().is_some() {
            SpotState::Occupied
        } else {
            SpotState::Free
        }
    }

    /// Whether the spot is free right now.
    pub fn is_free(&self) -> bool {
        self.state() == SpotState::Free
    }

    /// Ticket currently holding the spot, if any.
    pub fn occupant(&self) -> Option<TicketId> {
        self.occupant.lock().clone()
    }

    /// Bind the spot to a ticket.
    pub(crate) fn claim(&self, ticket_id: &str) -> Result<(), ParkingError> {
        let mut occupant = self.occupant.lock();
        if occupant.is_some() {
            return Err(ParkingError::AlreadyOccupied(self.id.clone()));
        }
        *occupant = Some(ticket_id.to_owned());
        Ok(())
    }

    /// Free the spot, returning the ticket that held it.
    pub(crate) fn release(&self) -> Result<TicketId, ParkingError> {
        self.occupant
            .lock()
            .take()
            .ok_or_else(|| ParkingError::NotOccupied(self.id.clone()))
    }

    /// Free the spot only if `ticket_id` holds it.
    ///
    /// A spot held by another ticket is left untouched.
    pub(crate) fn release_held(&self, ticket_id: &str) -> Result<(), ParkingError> {
        let mut occupant = self.occupant.lock();
        match occupant.as_deref() {
            None => return Err(ParkingError::NotOccupied(self.id.clone())),
            Some(holder) if holder != ticket_id => {
                return Err(ParkingError::HeldByOtherTicket {
                    spot_id: self.id.clone(),
                    ticket_id: ticket_id.to_owned(),
                    holder: holder.to_owned(),
                });
            }
            Some(_) => {}
        }
        *occupant = None;
        Ok(())
    }
}
