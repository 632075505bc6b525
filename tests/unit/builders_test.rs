//! Tests for builder modules

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use lotkeeper::builders::{build_gateways, build_lot, LotBuilder};
use lotkeeper::config::LotConfig;
use lotkeeper::core::{ParkingError, SpotCategory, Vehicle, VehicleCategory};
use lotkeeper::infra::InMemoryTicketStore;
use lotkeeper::util::ManualClock;
use rust_decimal::Decimal;

const JSON: &str = r#"{
    "floors": [
        { "id": "G", "counts": { "compact": 1, "large": 1 } },
        { "id": "L1", "counts": { "compact": 1 } }
    ],
    "compatibility": {
        "car": ["compact", "large"],
        "truck": ["large"],
        "electric_car": ["electric_car", "compact", "large"],
        "motorbike": ["motorcycle", "compact"]
    },
    "rates": { "disabled": 1, "compact": 10, "large": 15, "motorcycle": 2, "electric_car": 12 }
}"#;

#[test]
fn test_build_lot_from_config() {
    let cfg = LotConfig::from_json_str(JSON).unwrap();
    let (lot, fees) = build_lot(&cfg).unwrap();
    assert_eq!(lot.capacity(), 3);
    assert_eq!(lot.floors()[0].id(), "G");
    assert_eq!(fees.compute_fee(SpotCategory::Large, 0).unwrap(), Decimal::from(15));
}

#[test]
fn test_build_lot_rejects_invalid_config() {
    let mut cfg = LotConfig::from_json_str(JSON).unwrap();
    cfg.floors.clear();
    assert!(matches!(build_lot(&cfg), Err(ParkingError::Config(_))));
}

#[test]
fn test_build_gateways_share_one_lot() {
    let cfg = LotConfig::from_json_str(JSON).unwrap();
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let gw = build_gateways(&cfg, InMemoryTicketStore::new(), clock.clone(), None).unwrap();

    let ticket = gw.entry.enter(&Vehicle::new("a", VehicleCategory::Car)).unwrap();
    assert_eq!(ticket.spot_id, "G-compact-1");
    assert_eq!(gw.lot.occupied_count(), 1);

    clock.advance(Duration::hours(2));
    let receipt = gw.exit.exit(&ticket.id).unwrap();
    assert_eq!(receipt.fee, Decimal::from(20));
    assert_eq!(gw.lot.occupied_count(), 0);
    assert_eq!(Arc::strong_count(&gw.lot), 3);
}

#[test]
fn test_lot_builder_defaults_to_implicit_floor() {
    let lot = LotBuilder::new()
        .spot("S1", SpotCategory::Compact)
        .build()
        .unwrap();
    assert!(lot.floor("0").is_some());
    assert_eq!(lot.capacity(), 1);
}
