//! Audit trail for gateway activity.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gateway action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Vehicle admitted and ticket opened.
    Enter,
    /// Vehicle turned away with no spot available.
    Reject,
    /// Spot released and ticket closed.
    Exit,
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Gateway that produced the event.
    pub gateway: String,
    /// Action taken.
    pub action: AuditAction,
    /// Vehicle registration number, if known.
    pub vehicle_id: Option<String>,
    /// Related ticket, absent for rejections.
    pub ticket_id: Option<String>,
    /// Additional context such as the spot or the fee.
    pub detail: Option<String>,
    /// Event time.
    pub created_at: DateTime<Utc>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink holding the most recent events.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Sink that forwards events to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, event: AuditEvent) {
        tracing::info!(
            target: "lotkeeper::audit",
            gateway = %event.gateway,
            action = ?event.action,
            vehicle = event.vehicle_id.as_deref().unwrap_or("-"),
            ticket = event.ticket_id.as_deref().unwrap_or("-"),
            detail = event.detail.as_deref().unwrap_or(""),
            "audit"
        );
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    gateway: impl Into<String>,
    action: AuditAction,
    vehicle_id: Option<String>,
    ticket_id: Option<String>,
    detail: Option<String>,
    created_at: DateTime<Utc>,
) -> AuditEvent {
    AuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        gateway: gateway.into(),
        action,
        vehicle_id,
        ticket_id,
        detail,
        created_at,
    }
}
