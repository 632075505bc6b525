//! # Lotkeeper
//!
//! A concurrent spot allocation and ticketing engine for multi-floor parking lots.
//!
//! The engine assigns typed spots to arriving vehicles, tracks each assignment
//! as a ticket, and bills a duration-based fee when the vehicle leaves. Many
//! entry and exit gateways may run at once against a single shared [`core::Lot`].
//!
//! ## Key Features
//!
//! - **Per-spot locking**: a claim or release locks exactly one spot, so no two
//!   callers can ever hold the same spot and scans never block each other for long
//! - **Deterministic first-fit**: categories in compatibility order, floors and
//!   spots in registration order, so every assignment can be explained
//! - **Strict ticket lifecycle**: `Open -> Closed` exactly once; the spot is
//!   released before the ticket is marked closed
//! - **Hourly billing**: rounded up to whole hours with a one-hour minimum,
//!   using exact decimal arithmetic
//! - **Fail-fast configuration**: incomplete compatibility or rate tables are
//!   rejected at startup
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lotkeeper::builders::LotBuilder;
//! use lotkeeper::core::{FeeEngine, RateTable, SpotCategory, Vehicle, VehicleCategory};
//! use lotkeeper::gateway::{EntryGateway, ExitGateway};
//! use lotkeeper::infra::InMemoryTicketStore;
//! use lotkeeper::util::SystemClock;
//! use rust_decimal::Decimal;
//!
//! let lot = Arc::new(
//!     LotBuilder::new()
//!         .floor("F1")
//!         .spots(SpotCategory::Compact, 2)
//!         .spots(SpotCategory::Large, 1)
//!         .build()
//!         .unwrap(),
//! );
//! let rates = SpotCategory::ALL
//!     .into_iter()
//!     .fold(RateTable::default(), |t, c| t.with_rate(c, Decimal::from(10)));
//! let tickets = Arc::new(InMemoryTicketStore::new());
//! let clock = Arc::new(SystemClock);
//!
//! let entry = EntryGateway::new("north", Arc::clone(&lot), Arc::clone(&tickets), clock.clone());
//! let exit = ExitGateway::new("south", lot, tickets, FeeEngine::new(rates).unwrap(), clock);
//!
//! let ticket = entry.enter(&Vehicle::new("KA-01-1234", VehicleCategory::Car)).unwrap();
//! assert_eq!(ticket.spot_id, "F1-compact-1");
//!
//! let receipt = exit.exit(&ticket.id).unwrap();
//! assert_eq!(receipt.fee, Decimal::from(10));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Allocation core: catalog, spots, floors, lot, tickets, billing, audit.
pub mod core;
/// Configuration models for floors, compatibility, and rates.
pub mod config;
/// Builders to construct the lot and gateways from configuration.
pub mod builders;
/// Entry and exit gateways plus the payment capability.
pub mod gateway;
/// Infrastructure adapters for ticket storage.
pub mod infra;
/// Request/response API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
