//! Planner settings: projection horizons and allocation tolerance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALLOCATION_TOLERANCE, DEFAULT_HORIZON_YEARS, FULL_ALLOCATION, MAX_HORIZON_YEARS,
};
use crate::errors::{Error, Result};

/// Tunables the dashboard passes to the planner core.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerSettings {
    /// Horizon preselected in the projection view
    pub default_horizon_years: u32,
    /// Longest horizon a projection or comparison may use
    pub max_horizon_years: u32,
    /// Distance from 100 a committed allocation may sit at
    pub allocation_tolerance: Decimal,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            default_horizon_years: DEFAULT_HORIZON_YEARS,
            max_horizon_years: MAX_HORIZON_YEARS,
            allocation_tolerance: DEFAULT_ALLOCATION_TOLERANCE,
        }
    }
}

impl PlannerSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: PlannerSettings =
            serde_json::from_str(json).map_err(|e| Error::ConfigIO(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_horizon_years == 0 {
            return Err(Error::InvalidConfigValue(
                "maxHorizonYears must be at least 1".to_string(),
            ));
        }
        if self.default_horizon_years == 0 || self.default_horizon_years > self.max_horizon_years {
            return Err(Error::InvalidConfigValue(format!(
                "defaultHorizonYears must be between 1 and {} (got {})",
                self.max_horizon_years, self.default_horizon_years
            )));
        }
        if self.allocation_tolerance < Decimal::ZERO
            || self.allocation_tolerance >= FULL_ALLOCATION
        {
            return Err(Error::InvalidConfigValue(format!(
                "allocationTolerance must be in [0, {}) (got {})",
                FULL_ALLOCATION, self.allocation_tolerance
            )));
        }
        Ok(())
    }

    /// Restricts a requested horizon to the configured maximum.
    ///
    /// Values at or below zero pass through so the projection can emit just
    /// its starting point.
    pub fn clamp_horizon(&self, years: i32) -> i32 {
        let max = i32::try_from(self.max_horizon_years).unwrap_or(i32::MAX);
        years.min(max)
    }
}
