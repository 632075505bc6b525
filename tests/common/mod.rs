//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use lotkeeper::builders::LotBuilder;
use lotkeeper::core::{CompatibilityMap, FeeEngine, Lot, RateTable, SpotCategory, VehicleCategory};
use lotkeeper::gateway::{EntryGateway, ExitGateway};
use lotkeeper::infra::InMemoryTicketStore;
use lotkeeper::util::ManualClock;
use rust_decimal::Decimal;

pub fn rates(hourly: i64) -> RateTable {
    SpotCategory::ALL
        .into_iter()
        .fold(RateTable::default(), |t, c| t.with_rate(c, Decimal::from(hourly)))
}

pub fn car_compact_then_large() -> CompatibilityMap {
    let mut entries: BTreeMap<_, _> = CompatibilityMap::default()
        .iter()
        .map(|(v, list)| (v, list.to_vec()))
        .collect();
    entries.insert(
        VehicleCategory::Car,
        vec![SpotCategory::Compact, SpotCategory::Large],
    );
    CompatibilityMap::new(entries).unwrap()
}

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
    ))
}

pub struct Harness {
    pub lot: Arc<Lot>,
    pub tickets: Arc<InMemoryTicketStore>,
    pub clock: Arc<ManualClock>,
    pub entry: EntryGateway<InMemoryTicketStore>,
    pub exit: ExitGateway<InMemoryTicketStore>,
}

pub fn harness(lot: Lot, hourly: i64) -> Harness {
    lotkeeper::util::init_tracing(lotkeeper::util::DEFAULT_LOG_FILTER);
    let lot = Arc::new(lot);
    let tickets = Arc::new(InMemoryTicketStore::new());
    let clock = clock();
    let entry = EntryGateway::new("entry", Arc::clone(&lot), Arc::clone(&tickets), clock.clone());
    let exit = ExitGateway::new(
        "exit",
        Arc::clone(&lot),
        Arc::clone(&tickets),
        FeeEngine::new(rates(hourly)).unwrap(),
        clock.clone(),
    );
    Harness {
        lot,
        tickets,
        clock,
        entry,
        exit,
    }
}

pub fn mixed_lot() -> Lot {
    LotBuilder::new()
        .floor("F1")
        .spots(SpotCategory::Compact, 3)
        .spots(SpotCategory::Large, 1)
        .spots(SpotCategory::Motorcycle, 2)
        .floor("F2")
        .spots(SpotCategory::Compact, 2)
        .spots(SpotCategory::ElectricCar, 2)
        .spots(SpotCategory::Large, 2)
        .build()
        .unwrap()
}
