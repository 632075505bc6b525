//! Infrastructure adapters for ticket storage.

pub mod ticket_store;

pub use ticket_store::InMemoryTicketStore;
