//! Duration-based billing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::catalog::SpotCategory;
use crate::core::ParkingError;

const SECONDS_PER_HOUR: u64 = 3600;

/// Hourly rate per spot category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<SpotCategory, Decimal>,
}

impl RateTable {
    /// Build a table from explicit rates.
    pub const fn new(rates: BTreeMap<SpotCategory, Decimal>) -> Self {
        Self { rates }
    }

    /// Set the hourly rate for a category.
    #[must_use]
    pub fn with_rate(mut self, category: SpotCategory, hourly: Decimal) -> Self {
        self.rates.insert(category, hourly);
        self
    }

    /// Hourly rate for a category.
    pub fn rate(&self, category: SpotCategory) -> Option<Decimal> {
        self.rates.get(&category).copied()
    }

    /// Every category must be priced and no rate may be negative.
    pub fn validate(&self) -> Result<(), ParkingError> {
        for category in SpotCategory::ALL {
            match self.rates.get(&category) {
                None => return Err(ParkingError::UnknownCategory(category)),
                Some(rate) if *rate < Decimal::ZERO => {
                    return Err(ParkingError::Config(format!(
                        "negative hourly rate {rate} for {category:?}"
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Computes fees from a validated rate table.
#[derive(Debug, Clone)]
pub struct FeeEngine {
    rates: RateTable,
}

impl FeeEngine {
    /// Validate the rate table and build the engine.
    ///
    /// Run at startup; a missing category here is a configuration bug.
    pub fn new(rates: RateTable) -> Result<Self, ParkingError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Rate table in use.
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Billable whole hours: rounded up, at least one.
    pub const fn billable_hours(duration_seconds: u64) -> u64 {
        let hours = duration_seconds.div_ceil(SECONDS_PER_HOUR);
        if hours == 0 {
            1
        } else {
            hours
        }
    }

    /// Fee for holding a spot of `category` for `duration_seconds`.
    pub fn compute_fee(
        &self,
        category: SpotCategory,
        duration_seconds: u64,
    ) -> Result<Decimal, ParkingError> {
        let rate = self
            .rates
            .rate(category)
            .ok_or(ParkingError::UnknownCategory(category))?;
        let hours = Self::billable_hours(duration_seconds);
        Decimal::from(hours)
            .checked_mul(rate)
            .ok_or(ParkingError::FeeOverflow { category, hours })
    }

    /// Fee for the interval `[opened_at, closed_at]`; negative intervals bill as zero seconds.
    pub fn fee_between(
        &self,
        category: SpotCategory,
        opened_at: DateTime<Utc>,
        closed_at: DateTime<Utc>,
    ) -> Result<Decimal, ParkingError> {
        let seconds = u64::try_from((closed_at - opened_at).num_seconds()).unwrap_or(0);
        self.compute_fee(category, seconds)
    }
}
