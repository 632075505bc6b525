//! Lot configuration structures.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, CompatibilityMap, RateTable, SpotCategory, VehicleCategory};

/// Environment variable holding the path of the JSON config file.
pub const CONFIG_PATH_ENV: &str = "LOTKEEPER_CONFIG";

/// Upper bound on generated spots per category on one floor.
pub const MAX_SPOTS_PER_CATEGORY: u32 = 10_000;

/// One explicitly named spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotConfig {
    /// Spot identifier, unique within the floor.
    pub id: String,
    /// Spot category.
    pub category: SpotCategory,
}

/// Floor configuration.
///
/// Explicit `spots` are registered first, in listed order. `counts` then
/// appends generated spots named `{floor}-{category}-{n}` starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Floor identifier.
    pub id: String,
    /// Explicitly named spots.
    #[serde(default)]
    pub spots: Vec<SpotConfig>,
    /// Number of generated spots per category.
    #[serde(default)]
    pub counts: BTreeMap<SpotCategory, u32>,
}

impl FloorConfig {
    /// Spots in registration order, explicit ones first.
    pub fn expanded_spots(&self) -> Vec<SpotConfig> {
        let mut spots = self.spots.clone();
        for (category, count) in &self.counts {
            spots.extend((1..=*count).map(|n| SpotConfig {
                id: format!("{}-{}-{n}", self.id, category.label()),
                category: *category,
            }));
        }
        spots
    }

    /// Validate floor configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("floor id must not be empty".into());
        }
        if let Some((category, count)) = self
            .counts
            .iter()
            .find(|(_, count)| **count > MAX_SPOTS_PER_CATEGORY)
        {
            return Err(format!(
                "floor `{}` asks for {count} {} spots, at most {MAX_SPOTS_PER_CATEGORY} allowed",
                self.id,
                category.label()
            ));
        }
        let spots = self.expanded_spots();
        if spots.is_empty() {
            return Err("floor has no spots".into());
        }
        let mut seen = HashSet::new();
        for spot in &spots {
            if spot.id.trim().is_empty() {
                return Err("spot id must not be empty".into());
            }
            if !seen.insert(spot.id.as_str()) {
                return Err(format!("spot `{}` defined twice", spot.id));
            }
        }
        Ok(())
    }
}

/// Root lot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotConfig {
    /// Floors in scan order.
    pub floors: Vec<FloorConfig>,
    /// Ordered acceptable spot categories per vehicle category.
    pub compatibility: BTreeMap<VehicleCategory, Vec<SpotCategory>>,
    /// Hourly rate per spot category.
    pub rates: RateTable,
}

impl LotConfig {
    /// Validate all floors, the compatibility table, and the rate table.
    pub fn validate(&self) -> Result<(), String> {
        if self.floors.is_empty() {
            return Err("at least one floor must be defined".into());
        }
        let mut seen = HashSet::new();
        for floor in &self.floors {
            floor
                .validate()
                .map_err(|e| format!("floor `{}` invalid: {e}", floor.id))?;
            if !seen.insert(floor.id.as_str()) {
                return Err(format!("floor `{}` defined twice", floor.id));
            }
        }
        CompatibilityMap::new(self.compatibility.clone()).map_err(|e| e.to_string())?;
        self.rates.validate().map_err(|e| format!("rates invalid: {e}"))?;
        Ok(())
    }

    /// Parse lot configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading lot config {}", path.display()))?;
        Self::from_json_str(&raw)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading lot config {}", path.display()))
    }

    /// Load `.env` if present, then read the file named by [`CONFIG_PATH_ENV`].
    pub fn from_env() -> AppResult<Self> {
        // A missing .env file is fine; the variable may come from the process.
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV)
            .with_context(|| format!("{CONFIG_PATH_ENV} is not set"))?;
        Self::from_path(path)
    }
}
