//! In-memory ticket store.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;

use crate::core::{ParkingError, Ticket, TicketId, TicketStore};

/// Ticket store keyed by id.
///
/// The map sits behind a `parking_lot::RwLock` that is only written on
/// insert. Each ticket has its own `Mutex`, so closes on different tickets
/// never contend and a close holds nothing but its own ticket.
#[derive(Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<HashMap<TicketId, Arc<Mutex<Ticket>>>>,
}

impl InMemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, id: &str) -> Result<Arc<Mutex<Ticket>>, ParkingError> {
        self.tickets
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ParkingError::TicketNotFound(id.to_owned()))
    }
}

impl TicketStore for InMemoryTicketStore {
    fn insert(&self, ticket: Ticket) -> Result<(), ParkingError> {
        let mut tickets = self.tickets.write();
        match tickets.entry(ticket.id.clone()) {
            Entry::Occupied(_) => Err(ParkingError::DuplicateTicket(ticket.id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(ticket)));
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Result<Ticket, ParkingError> {
        Ok(self.entry(id)?.lock().clone())
    }

    fn close_with<F>(&self, id: &str, finish: F) -> Result<Ticket, ParkingError>
    where
        F: FnOnce(&Ticket) -> Result<(DateTime<Utc>, Decimal), ParkingError>,
    {
        // Map lock is dropped before the ticket lock is taken.
        let entry = self.entry(id)?;
        let mut ticket = entry.lock();
        if !ticket.is_open() {
            return Err(ParkingError::TicketAlreadyClosed(ticket.id.clone()));
        }
        let (closed_at, fee) = finish(&ticket)?;
        ticket.close(closed_at, fee)?;
        Ok(ticket.clone())
    }

    fn open_count(&self) -> usize {
        self.tickets
            .read()
            .values()
            .filter(|t| t.lock().is_open())
            .count()
    }

    fn open_tickets(&self) -> Vec<Ticket> {
        self.tickets
            .read()
            .values()
            .filter_map(|t| {
                let ticket = t.lock();
                ticket.is_open().then(|| ticket.clone())
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.tickets.read().len()
    }
}
