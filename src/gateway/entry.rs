//! Entry gateway: allocate a spot and open a ticket.

use std::sync::Arc;

use crate::core::{build_audit_event, AuditAction, Lot, ParkingError, Ticket, TicketStore, Vehicle};
use crate::gateway::{record, SharedAuditSink};
use crate::util::clock::Clock;

/// Admits vehicles into the lot.
pub struct EntryGateway<S> {
    id: String,
    lot: Arc<Lot>,
    tickets: Arc<S>,
    clock: Arc<dyn Clock>,
    audit: Option<SharedAuditSink>,
}

impl<S: TicketStore> EntryGateway<S> {
    /// Create a gateway sharing `lot` and `tickets` with its exit counterpart.
    pub fn new(id: impl Into<String>, lot: Arc<Lot>, tickets: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            id: id.into(),
            lot,
            tickets,
            clock,
            audit: None,
        }
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: SharedAuditSink) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Gateway identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Allocate a spot for `vehicle` and open a ticket for it.
    ///
    /// `NoSpotAvailable` is passed through untouched; retry policy belongs to the caller.
    pub fn enter(&self, vehicle: &Vehicle) -> Result<Ticket, ParkingError> {
        let ticket_id = Ticket::next_id();
        let allocation = match self.lot.acquire(vehicle.category, &ticket_id) {
            Ok(allocation) => allocation,
            Err(e) => {
                tracing::warn!(
                    gateway = %self.id,
                    vehicle = %vehicle.id,
                    category = ?vehicle.category,
                    "entry rejected: {e}"
                );
                record(self.audit.as_ref(), || {
                    build_audit_event(
                        self.id.clone(),
                        AuditAction::Reject,
                        Some(vehicle.id.clone()),
                        None,
                        Some(e.to_string()),
                        self.clock.now(),
                    )
                });
                return Err(e);
            }
        };

        let ticket = Ticket::open(ticket_id, vehicle, &allocation, self.clock.now());
        if let Err(e) = self.tickets.insert(ticket.clone()) {
            // Hand the spot back so a failed insert cannot leak it.
            if let Err(release_err) =
                self.lot
                    .release_held(&allocation.floor_id, &allocation.spot_id, &ticket.id)
            {
                tracing::error!(
                    gateway = %self.id,
                    spot = %allocation.spot_id,
                    "failed to roll back claim: {release_err}"
                );
            }
            tracing::error!(gateway = %self.id, ticket = %ticket.id, "ticket insert failed: {e}");
            return Err(e);
        }

        tracing::info!(
            gateway = %self.id,
            ticket = %ticket.id,
            vehicle = %vehicle.id,
            floor = %ticket.floor_id,
            spot = %ticket.spot_id,
            "vehicle entered"
        );
        record(self.audit.as_ref(), || {
            build_audit_event(
                self.id.clone(),
                AuditAction::Enter,
                Some(vehicle.id.clone()),
                Some(ticket.id.clone()),
                Some(format!("{}/{}", ticket.floor_id, ticket.spot_id)),
                ticket.opened_at,
            )
        });
        Ok(ticket)
    }
}
