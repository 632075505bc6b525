//! Allocation core: catalog, spots, floors, the lot, tickets, and billing.

pub mod audit;
pub mod catalog;
pub mod error;
pub mod fee;
pub mod floor;
pub mod lot;
pub mod spot;
pub mod ticket;

pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink,
};
pub use catalog::{CompatibilityMap, SpotCategory, Vehicle, VehicleCategory};
pub use error::{AppResult, ErrorKind, ParkingError};
pub use fee::{FeeEngine, RateTable};
pub use floor::{Floor, FloorId, Occupancy};
pub use lot::{Allocation, Lot, LotSnapshot};
pub use spot::{Spot, SpotId, SpotState};
pub use ticket::{Ticket, TicketId, TicketStatus, TicketStore};
