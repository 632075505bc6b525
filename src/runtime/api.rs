//! API-facing request/response models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{ErrorKind, Lot, LotSnapshot, ParkingError, TicketStore, Vehicle, VehicleCategory};
use crate::gateway::{EntryGateway, ExitGateway};

/// Entry request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    /// Vehicle registration number.
    pub vehicle_id: String,
    /// Vehicle category.
    pub vehicle_category: VehicleCategory,
}

/// Entry response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryResponse {
    /// Ticket identifier to present at exit.
    pub ticket_id: String,
    /// Floor holding the spot.
    pub floor_id: String,
    /// Assigned spot.
    pub spot_id: String,
    /// Entry time.
    pub opened_at: DateTime<Utc>,
}

/// Exit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitRequest {
    /// Ticket issued at entry.
    pub ticket_id: String,
}

/// Exit response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitResponse {
    /// Amount charged.
    pub fee: Decimal,
    /// Exit time.
    pub closed_at: DateTime<Utc>,
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable code, e.g. `NoSpotAvailable`.
    pub code: String,
    /// Error class.
    pub kind: ErrorKind,
    /// Human-readable message. Internal errors carry a generic message.
    pub message: String,
}

impl From<ParkingError> for ApiError {
    fn from(err: ParkingError) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::Internal | ErrorKind::Configuration => "internal error".to_owned(),
            ErrorKind::Unavailable | ErrorKind::Client => err.to_string(),
        };
        Self {
            code: err.code().to_owned(),
            kind,
            message,
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Total spots.
    pub capacity: usize,
    /// Spots currently free.
    pub free: usize,
}

/// Admit a vehicle.
pub fn handle_entry<S: TicketStore>(
    gateway: &EntryGateway<S>,
    req: EntryRequest,
) -> Result<EntryResponse, ApiError> {
    let vehicle = Vehicle::new(req.vehicle_id, req.vehicle_category);
    let ticket = gateway.enter(&vehicle)?;
    Ok(EntryResponse {
        ticket_id: ticket.id,
        floor_id: ticket.floor_id,
        spot_id: ticket.spot_id,
        opened_at: ticket.opened_at,
    })
}

/// Let a vehicle out.
pub fn handle_exit<S: TicketStore>(
    gateway: &ExitGateway<S>,
    req: &ExitRequest,
) -> Result<ExitResponse, ApiError> {
    let receipt = gateway.exit(&req.ticket_id)?;
    Ok(ExitResponse {
        fee: receipt.fee,
        closed_at: receipt.closed_at,
    })
}

/// Occupancy per floor and category.
pub fn occupancy(lot: &Lot) -> LotSnapshot {
    lot.snapshot()
}

/// Return a health payload.
pub fn health(lot: &Lot) -> Health {
    let snapshot = lot.snapshot();
    Health {
        ok: lot.capacity() > 0,
        capacity: lot.capacity(),
        free: snapshot.free(),
    }
}
