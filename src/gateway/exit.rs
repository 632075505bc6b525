//! Exit gateway: bill, release the spot, close the ticket.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    build_audit_event, AuditAction, ErrorKind, FeeEngine, Lot, ParkingError, Ticket, TicketStore,
};
use crate::gateway::payment::{PaymentGateway, SettlementOutcome};
use crate::gateway::{record, SharedAuditSink};
use crate::util::clock::Clock;

/// Result of a successful exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitReceipt {
    /// Closed ticket.
    pub ticket_id: String,
    /// Amount charged.
    pub fee: Decimal,
    /// Exit time.
    pub closed_at: DateTime<Utc>,
    /// Payment outcome, present only for `checkout`.
    pub settlement: Option<SettlementOutcome>,
}

/// Lets vehicles out of the lot.
pub struct ExitGateway<S> {
    id: String,
    lot: Arc<Lot>,
    tickets: Arc<S>,
    fees: FeeEngine,
    clock: Arc<dyn Clock>,
    audit: Option<SharedAuditSink>,
}

impl<S: TicketStore> ExitGateway<S> {
    /// Create a gateway sharing `lot` and `tickets` with its entry counterpart.
    pub fn new(
        id: impl Into<String>,
        lot: Arc<Lot>,
        tickets: Arc<S>,
        fees: FeeEngine,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id: id.into(),
            lot,
            tickets,
            fees,
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

    /// Close `ticket_id`: compute the fee, release the spot, then mark the ticket closed.
    ///
    /// The spot is released before the ticket is closed. If the release fails,
    /// including when the spot is held by another ticket, the spot and the
    /// ticket are left as they were and the error is returned.
    pub fn exit(&self, ticket_id: &str) -> Result<ExitReceipt, ParkingError> {
        let closed = self
            .tickets
            .close_with(ticket_id, |ticket| self.settle_spot(ticket))
            .inspect_err(|e| self.log_failure(ticket_id, e))?;

        // close_with always sets both on success.
        let fee = closed.fee.unwrap_or_default();
        let closed_at = closed.closed_at.unwrap_or(closed.opened_at);
        tracing::info!(
            gateway = %self.id,
            ticket = %closed.id,
            vehicle = %closed.vehicle_id,
            floor = %closed.floor_id,
            spot = %closed.spot_id,
            %fee,
            "vehicle exited"
        );
        record(self.audit.as_ref(), || {
            build_audit_event(
                self.id.clone(),
                AuditAction::Exit,
                Some(closed.vehicle_id.clone()),
                Some(closed.id.clone()),
                Some(format!("fee={fee}")),
                closed_at,
            )
        });
        Ok(ExitReceipt {
            ticket_id: closed.id,
            fee,
            closed_at,
            settlement: None,
        })
    }

    /// Exit, then collect the fee through `payment`.
    ///
    /// The spot is already free when payment runs; a declined payment is
    /// reported on the receipt and left to the payment collaborator.
    pub async fn checkout<P>(&self, ticket_id: &str, payment: &P) -> Result<ExitReceipt, ParkingError>
    where
        P: PaymentGateway + ?Sized,
    {
        let mut receipt = self.exit(ticket_id)?;
        let outcome = payment.settle(receipt.fee).await;
        if let SettlementOutcome::Declined(reason) = &outcome {
            tracing::warn!(gateway = %self.id, ticket = %ticket_id, fee = %receipt.fee, "payment declined: {reason}");
        }
        receipt.settlement = Some(outcome);
        Ok(receipt)
    }

    fn settle_spot(&self, ticket: &Ticket) -> Result<(DateTime<Utc>, Decimal), ParkingError> {
        let closed_at = self.clock.now();
        let fee = self
            .fees
            .fee_between(ticket.spot_category, ticket.opened_at, closed_at)?;
        self.lot
            .release_held(&ticket.floor_id, &ticket.spot_id, &ticket.id)?;
        Ok((closed_at, fee))
    }

    fn log_failure(&self, ticket_id: &str, err: &ParkingError) {
        match err.kind() {
            ErrorKind::Internal | ErrorKind::Configuration => {
                tracing::error!(gateway = %self.id, ticket = %ticket_id, code = err.code(), "exit failed: {err}");
            }
            ErrorKind::Client | ErrorKind::Unavailable => {
                tracing::warn!(gateway = %self.id, ticket = %ticket_id, code = err.code(), "exit refused: {err}");
            }
        }
    }
}
