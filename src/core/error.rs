//! Error types for allocation, ticketing, and billing operations.

use thiserror::Error;

use crate::core::catalog::SpotCategory;

/// Coarse classification of a [`ParkingError`], used by callers to decide
/// whether to retry, report to the client, or page an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Expected under load; the caller may retry with backoff or redirect.
    Unavailable,
    /// Caller protocol error (stale or duplicate ticket id). Never retried.
    Client,
    /// Internal consistency failure. Indicates a bug.
    Internal,
    /// Startup configuration is incomplete or invalid.
    Configuration,
}

/// Errors produced by the lot, its floors and spots, the ticket store, and the fee engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// Every compatible (category, floor) combination is occupied.
    #[error("no spot available")]
    NoSpotAvailable,
    /// Ticket id is unknown to the store.
    #[error("ticket not found: {0}")]
    TicketNotFound(String),
    /// Ticket has already been closed by an earlier exit.
    #[error("ticket already closed: {0}")]
    TicketAlreadyClosed(String),
    /// A floor/spot pair does not resolve to a registered spot.
    #[error("invalid spot reference: floor `{floor_id}`, spot `{spot_id}`")]
    InvalidSpotReference {
        /// Floor identifier as supplied.
        floor_id: String,
        /// Spot identifier as supplied.
        spot_id: String,
    },
    /// Spot id is not registered on the floor.
    #[error("spot not found: {0}")]
    SpotNotFound(String),
    /// Spot is already held by another ticket.
    #[error("spot `{0}` already occupied")]
    AlreadyOccupied(String),
    /// Spot was released while free.
    #[error("spot `{0}` not occupied")]
    NotOccupied(String),
    /// Spot is held by a different ticket than the one releasing it.
    #[error("spot `{spot_id}` is held by `{holder}`, not `{ticket_id}`")]
    HeldByOtherTicket {
        /// Spot being released.
        spot_id: String,
        /// Ticket that asked for the release.
        ticket_id: String,
        /// Ticket actually holding the spot.
        holder: String,
    },
    /// Fee does not fit in a decimal.
    #[error("fee overflow for {category:?} over {hours} hours")]
    FeeOverflow {
        /// Billed spot category.
        category: SpotCategory,
        /// Billable hours.
        hours: u64,
    },
    /// Rate table has no entry for the category.
    #[error("unknown category: {0:?}")]
    UnknownCategory(SpotCategory),
    /// Ticket id collided with an existing ticket.
    #[error("duplicate ticket id: {0}")]
    DuplicateTicket(String),
    /// Configuration rejected at startup.
    #[error("config invalid: {0}")]
    Config(String),
}

impl ParkingError {
    /// Classify the error for propagation policy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSpotAvailable => ErrorKind::Unavailable,
            Self::TicketNotFound(_) | Self::TicketAlreadyClosed(_) => ErrorKind::Client,
            Self::InvalidSpotReference { .. }
            | Self::SpotNotFound(_)
            | Self::AlreadyOccupied(_)
            | Self::NotOccupied(_)
            | Self::HeldByOtherTicket { .. }
            | Self::FeeOverflow { .. }
            | Self::DuplicateTicket(_) => ErrorKind::Internal,
            Self::UnknownCategory(_) | Self::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Stable machine-readable code for the error variant.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoSpotAvailable => "NoSpotAvailable",
            Self::TicketNotFound(_) => "TicketNotFound",
            Self::TicketAlreadyClosed(_) => "TicketAlreadyClosed",
            Self::InvalidSpotReference { .. } => "InvalidSpotReference",
            Self::SpotNotFound(_) => "SpotNotFound",
            Self::AlreadyOccupied(_) => "AlreadyOccupied",
            Self::NotOccupied(_) => "NotOccupied",
            Self::HeldByOtherTicket { .. } => "HeldByOtherTicket",
            Self::FeeOverflow { .. } => "FeeOverflow",
            Self::UnknownCategory(_) => "UnknownCategory",
            Self::DuplicateTicket(_) => "DuplicateTicket",
            Self::Config(_) => "Config",
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
