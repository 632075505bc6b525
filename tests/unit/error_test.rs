//! Tests for error types

use lotkeeper::core::{ErrorKind, ParkingError, SpotCategory};

#[test]
fn test_no_spot_available_error() {
    let err = ParkingError::NoSpotAvailable;
    assert_eq!(format!("{err}"), "no spot available");
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(err.code(), "NoSpotAvailable");
}

#[test]
fn test_ticket_errors_are_client_errors() {
    let not_found = ParkingError::TicketNotFound("T-1".to_string());
    let closed = ParkingError::TicketAlreadyClosed("T-1".to_string());
    assert_eq!(format!("{not_found}"), "ticket not found: T-1");
    assert_eq!(format!("{closed}"), "ticket already closed: T-1");
    assert_eq!(not_found.kind(), ErrorKind::Client);
    assert_eq!(closed.kind(), ErrorKind::Client);
}

#[test]
fn test_reference_errors_are_internal() {
    let err = ParkingError::InvalidSpotReference {
        floor_id: "F1".to_string(),
        spot_id: "X".to_string(),
    };
    assert_eq!(format!("{err}"), "invalid spot reference: floor `F1`, spot `X`");
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(ParkingError::SpotNotFound("X".into()).kind(), ErrorKind::Internal);
    assert_eq!(ParkingError::NotOccupied("X".into()).kind(), ErrorKind::Internal);
}

#[test]
fn test_unknown_category_is_configuration() {
    let err = ParkingError::UnknownCategory(SpotCategory::Disabled);
    assert_eq!(format!("{err}"), "unknown category: Disabled");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_holder_mismatch_and_overflow_are_internal() {
    let held = ParkingError::HeldByOtherTicket {
        spot_id: "C1".into(),
        ticket_id: "T-1".into(),
        holder: "T-2".into(),
    };
    assert_eq!(format!("{held}"), "spot `C1` is held by `T-2`, not `T-1`");
    assert_eq!(held.kind(), ErrorKind::Internal);
    assert_eq!(held.code(), "HeldByOtherTicket");

    let overflow = ParkingError::FeeOverflow {
        category: SpotCategory::Large,
        hours: 7,
    };
    assert_eq!(overflow.kind(), ErrorKind::Internal);
    assert_eq!(overflow.code(), "FeeOverflow");
}
