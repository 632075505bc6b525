//! Configuration models for floors, compatibility, and rates.

pub mod lot;

pub use lot::{FloorConfig, LotConfig, SpotConfig, CONFIG_PATH_ENV, MAX_SPOTS_PER_CATEGORY};
