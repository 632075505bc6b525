//! Entry and exit gateways orchestrating the lot, the ticket store, and billing.
//!
//! Gateways are thin: they never retry and never hold a lock across more than
//! one spot or one ticket. Both gateways share a single `Arc<Lot>`.

pub mod entry;
pub mod exit;
pub mod payment;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{AuditEvent, AuditSink};

pub use entry::EntryGateway;
pub use exit::{ExitGateway, ExitReceipt};
pub use payment::{ApproveAll, PaymentGateway, SettlementOutcome};

/// Audit sink shared by every gateway of a lot.
pub type SharedAuditSink = Arc<Mutex<Box<dyn AuditSink>>>;

/// Wrap a sink for sharing between gateways.
pub fn shared_audit(sink: impl AuditSink + 'static) -> SharedAuditSink {
    let sink: Box<dyn AuditSink> = Box::new(sink);
    Arc::new(Mutex::new(sink))
}

fn record(audit: Option<&SharedAuditSink>, event: impl FnOnce() -> AuditEvent) {
    if let Some(sink) = audit {
        sink.lock().record(event());
    }
}
