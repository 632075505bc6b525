//! Request/response surface exposed to external collaborators.

pub mod api;

pub use api::{
    handle_entry, handle_exit, health, occupancy, ApiError, EntryRequest, EntryResponse,
    ExitRequest, ExitResponse, Health,
};
