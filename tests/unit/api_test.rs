//! Tests for the request/response API surface

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use lotkeeper::builders::{build_gateways, LotBuilder};
use lotkeeper::config::LotConfig;
use lotkeeper::core::{ErrorKind, ParkingError, SpotCategory, VehicleCategory};
use lotkeeper::infra::InMemoryTicketStore;
use lotkeeper::runtime::{
    handle_entry, handle_exit, health, occupancy, ApiError, EntryRequest, ExitRequest,
};
use lotkeeper::util::ManualClock;

const JSON: &str = r#"{
    "floors": [{ "id": "F1", "spots": [{ "id": "C1", "category": "compact" }] }],
    "compatibility": {
        "car": ["compact", "large"],
        "truck": ["large"],
        "electric_car": ["electric_car", "compact"],
        "motorbike": ["motorcycle", "compact"]
    },
    "rates": { "disabled": 1, "compact": 10, "large": 15, "motorcycle": 2, "electric_car": 12 }
}"#;

#[test]
fn test_entry_exit_roundtrip_through_api() {
    let cfg = LotConfig::from_json_str(JSON).unwrap();
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()));
    let gw = build_gateways(&cfg, InMemoryTicketStore::new(), clock, None).unwrap();

    let entered = handle_entry(
        &gw.entry,
        EntryRequest {
            vehicle_id: "car1".into(),
            vehicle_category: VehicleCategory::Car,
        },
    )
    .unwrap();
    assert_eq!((entered.floor_id.as_str(), entered.spot_id.as_str()), ("F1", "C1"));

    let full = handle_entry(
        &gw.entry,
        EntryRequest {
            vehicle_id: "car2".into(),
            vehicle_category: VehicleCategory::Car,
        },
    )
    .unwrap_err();
    assert_eq!(full.code, "NoSpotAvailable");
    assert_eq!(full.kind, ErrorKind::Unavailable);

    let snap = occupancy(&gw.lot);
    assert_eq!(snap.floors["F1"][&SpotCategory::Compact].occupied, 1);
    assert_eq!(health(&gw.lot).free, 0);

    let req = ExitRequest {
        ticket_id: entered.ticket_id.clone(),
    };
    let exited = handle_exit(&gw.exit, &req).unwrap();
    assert_eq!(exited.fee.to_string(), "10");

    let again = handle_exit(&gw.exit, &req).unwrap_err();
    assert_eq!(again.code, "TicketAlreadyClosed");
    assert_eq!(again.kind, ErrorKind::Client);
}

#[test]
fn test_internal_errors_hide_details() {
    let err = ApiError::from(ParkingError::InvalidSpotReference {
        floor_id: "F1".into(),
        spot_id: "C9".into(),
    });
    assert_eq!(err.code, "InvalidSpotReference");
    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, "internal error");
}

#[test]
fn test_snapshot_serializes_as_nested_maps() {
    let lot = LotBuilder::new()
        .floor("F1")
        .spots(SpotCategory::Compact, 2)
        .build()
        .unwrap();
    let json = serde_json::to_value(occupancy(&lot)).unwrap();
    assert_eq!(json["floors"]["F1"]["compact"]["free"], 2);
    assert_eq!(json["floors"]["F1"]["compact"]["occupied"], 0);
    assert!(health(&lot).ok);
}
