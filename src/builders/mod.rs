//! Builders to construct the lot and its gateways from configuration.

pub mod lot_builder;

pub use lot_builder::{build_gateways, build_lot, Gateways, LotBuilder};
