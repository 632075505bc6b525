//! Builders to construct a lot and its gateways.

use std::sync::Arc;

use crate::config::LotConfig;
use crate::core::{CompatibilityMap, FeeEngine, Floor, Lot, ParkingError, SpotCategory, TicketStore};
use crate::gateway::{EntryGateway, ExitGateway, SharedAuditSink};
use crate::util::clock::Clock;

/// Fluent builder for a [`Lot`].
///
/// Floors are scanned in the order they are added; spots within a floor in
/// the order they are added to it.
#[derive(Default)]
pub struct LotBuilder {
    floors: Vec<(String, Vec<(String, SpotCategory)>)>,
    compatibility: Option<CompatibilityMap>,
}

impl LotBuilder {
    /// Start an empty builder using the default compatibility table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a floor.
    #[must_use]
    pub fn floor(mut self, id: impl Into<String>) -> Self {
        self.floors.push((id.into(), Vec::new()));
        self
    }

    /// Append a spot to the most recently added floor.
    ///
    /// Spots added before any floor are placed on an implicit floor `"0"`.
    #[must_use]
    pub fn spot(mut self, id: impl Into<String>, category: SpotCategory) -> Self {
        if self.floors.is_empty() {
            self.floors.push(("0".into(), Vec::new()));
        }
        if let Some((_, spots)) = self.floors.last_mut() {
            spots.push((id.into(), category));
        }
        self
    }

    /// Append `count` generated spots `{floor}-{category}-{n}` to the most recent floor.
    #[must_use]
    pub fn spots(mut self, category: SpotCategory, count: u32) -> Self {
        let floor_id = self
            .floors
            .last()
            .map_or_else(|| "0".to_owned(), |(id, _)| id.clone());
        let start = self
            .floors
            .last()
            .map_or(0, |(_, spots)| spots.iter().filter(|(_, c)| *c == category).count());
        for n in 1..=count as usize {
            self = self.spot(format!("{floor_id}-{}-{}", category.label(), start + n), category);
        }
        self
    }

    /// Use an explicit compatibility table.
    #[must_use]
    pub fn compatibility(mut self, compatibility: CompatibilityMap) -> Self {
        self.compatibility = Some(compatibility);
        self
    }

    /// Validate and build the lot.
    pub fn build(self) -> Result<Lot, ParkingError> {
        let mut floors = Vec::with_capacity(self.floors.len());
        for (floor_id, spots) in self.floors {
            let mut floor = Floor::new(floor_id);
            for (spot_id, category) in spots {
                floor.add_spot(spot_id, category)?;
            }
            floors.push(floor);
        }
        Lot::new(floors, self.compatibility.unwrap_or_default())
    }
}

/// Build the lot and fee engine from a lot configuration.
pub fn build_lot(cfg: &LotConfig) -> Result<(Lot, FeeEngine), ParkingError> {
    cfg.validate().map_err(ParkingError::Config)?;

    let compatibility = CompatibilityMap::new(cfg.compatibility.clone())?;
    let fees = FeeEngine::new(cfg.rates.clone())?;

    let mut builder = LotBuilder::new().compatibility(compatibility);
    for floor in &cfg.floors {
        builder = builder.floor(floor.id.clone());
        for spot in floor.expanded_spots() {
            builder = builder.spot(spot.id, spot.category);
        }
    }
    Ok((builder.build()?, fees))
}

/// An entry gateway and an exit gateway sharing one lot and one ticket store.
pub struct Gateways<S> {
    /// Shared allocator.
    pub lot: Arc<Lot>,
    /// Shared ticket store.
    pub tickets: Arc<S>,
    /// Entry side.
    pub entry: EntryGateway<S>,
    /// Exit side.
    pub exit: ExitGateway<S>,
}

/// Build a lot from configuration and wire one entry and one exit gateway to it.
pub fn build_gateways<S: TicketStore>(
    cfg: &LotConfig,
    tickets: S,
    clock: Arc<dyn Clock>,
    audit: Option<SharedAuditSink>,
) -> Result<Gateways<S>, ParkingError> {
    let (lot, fees) = build_lot(cfg)?;
    let lot = Arc::new(lot);
    let tickets = Arc::new(tickets);

    let mut entry = EntryGateway::new("entry-1", Arc::clone(&lot), Arc::clone(&tickets), Arc::clone(&clock));
    let mut exit = ExitGateway::new("exit-1", Arc::clone(&lot), Arc::clone(&tickets), fees, clock);
    if let Some(audit) = audit {
        entry = entry.with_audit(Arc::clone(&audit));
        exit = exit.with_audit(audit);
    }

    Ok(Gateways {
        lot,
        tickets,
        entry,
        exit,
    })
}
