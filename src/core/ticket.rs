//! Tickets and the store abstraction that tracks their lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::catalog::{SpotCategory, Vehicle, VehicleCategory};
use crate::core::lot::Allocation;
use crate::core::ParkingError;

/// Ticket identifier.
pub type TicketId = String;

/// Lifecycle state of a ticket. `Open -> Closed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Spot is held.
    Open,
    /// Spot was released and the fee recorded.
    Closed,
}

/// Record of one allocation from claim to release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier.
    pub id: TicketId,
    /// Registration number of the vehicle.
    pub vehicle_id: String,
    /// Vehicle category presented at entry.
    pub vehicle_category: VehicleCategory,
    /// Floor holding the spot.
    pub floor_id: String,
    /// Spot held by this ticket.
    pub spot_id: String,
    /// Category of the held spot, drives billing.
    pub spot_category: SpotCategory,
    /// When the spot was claimed.
    pub opened_at: DateTime<Utc>,
    /// When the spot was released.
    pub closed_at: Option<DateTime<Utc>>,
    /// Fee charged at exit.
    pub fee: Option<Decimal>,
}

impl Ticket {
    /// Generate a fresh ticket id.
    pub fn next_id() -> TicketId {
        format!("T-{}", uuid::Uuid::new_v4())
    }

    /// Open a ticket for a vehicle that was just allocated a spot.
    pub fn open(
        id: TicketId,
        vehicle: &Vehicle,
        allocation: &Allocation,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            vehicle_id: vehicle.id.clone(),
            vehicle_category: vehicle.category,
            floor_id: allocation.floor_id.clone(),
            spot_id: allocation.spot_id.clone(),
            spot_category: allocation.category,
            opened_at,
            closed_at: None,
            fee: None,
        }
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> TicketStatus {
        if self.closed_at.is_some() {
            TicketStatus::Closed
        } else {
            TicketStatus::Open
        }
    }

    /// Whether the ticket still holds its spot.
    pub const fn is_open(&self) -> bool {
        matches!(self.status(), TicketStatus::Open)
    }

    /// Seconds between opening and `until`, clamped at zero for clock skew.
    pub fn duration_seconds(&self, until: DateTime<Utc>) -> u64 {
        u64::try_from((until - self.opened_at).num_seconds()).unwrap_or(0)
    }

    /// Record the exit. Fails if the ticket is already closed.
    pub fn close(&mut self, closed_at: DateTime<Utc>, fee: Decimal) -> Result<(), ParkingError> {
        if !self.is_open() {
            return Err(ParkingError::TicketAlreadyClosed(self.id.clone()));
        }
        self.closed_at = Some(closed_at);
        self.fee = Some(fee);
        Ok(())
    }
}

/// Abstraction for ticket storage backends.
///
/// Implementations must serialize closes per ticket: while `close_with` runs
/// its callback for a ticket, no other `close_with` on the same id may observe
/// that ticket as open.
pub trait TicketStore: Send + Sync {
    /// Store a freshly opened ticket.
    fn insert(&self, ticket: Ticket) -> Result<(), ParkingError>;
    /// Fetch a copy of a ticket.
    fn get(&self, id: &str) -> Result<Ticket, ParkingError>;
    /// Close an open ticket.
    ///
    /// `finish` receives the open ticket and returns the close time and fee;
    /// it runs while the ticket is held, so side effects such as releasing the
    /// spot happen at most once per ticket. If `finish` fails the ticket stays
    /// open and the error is returned unchanged.
    fn close_with<F>(&self, id: &str, finish: F) -> Result<Ticket, ParkingError>
    where
        F: FnOnce(&Ticket) -> Result<(DateTime<Utc>, Decimal), ParkingError>;
    /// Number of open tickets.
    fn open_count(&self) -> usize;
    /// Copies of every open ticket.
    fn open_tickets(&self) -> Vec<Ticket>;
    /// Number of stored tickets, open or closed.
    fn len(&self) -> usize;
    /// Whether the store holds no tickets.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
