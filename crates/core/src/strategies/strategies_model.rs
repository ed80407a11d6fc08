//! Strategy domain models.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocation::AllocationMap;
use crate::constants::{
    DEFAULT_ALLOCATION_TOLERANCE, FULL_ALLOCATION, MAX_RISK_SCORE, MIN_RISK_SCORE,
};
use crate::errors::{Result, ValidationError};

/// Summary risk/return figures attached to a strategy.
///
/// Only `expected_return` feeds the projection engine; the others are stored
/// for display and comparison.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyMetrics {
    /// Annual return in percent
    pub expected_return: Decimal,
    /// 1 (lowest) to 5 (highest)
    pub risk_score: u8,
    pub sharpe_ratio: Decimal,
    /// Annualized volatility in percent
    pub volatility: Decimal,
    /// Worst peak-to-trough loss in percent
    pub max_drawdown: Decimal,
}

/// A named target allocation with its summary metrics.
///
/// Strategies are immutable once created apart from their name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub target_allocations: AllocationMap,
    #[serde(flatten)]
    pub metrics: StrategyMetrics,
    #[serde(rename = "isAIGenerated", default)]
    pub is_ai_generated: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStrategy {
    pub name: String,
    pub description: Option<String>,
    pub target_allocations: AllocationMap,
    #[serde(flatten)]
    pub metrics: StrategyMetrics,
    #[serde(rename = "isAIGenerated", default)]
    pub is_ai_generated: bool,
}

impl NewStrategy {
    /// Validates the new strategy data.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        if let Some((asset_id, value)) = self
            .target_allocations
            .iter()
            .find(|(_, value)| **value < Decimal::ZERO)
        {
            return Err(ValidationError::InvalidAllocation(format!(
                "allocation for '{}' is negative ({})",
                asset_id, value
            ))
            .into());
        }

        let total = self.target_allocations.total();
        if total > FULL_ALLOCATION + DEFAULT_ALLOCATION_TOLERANCE {
            return Err(ValidationError::InvalidAllocation(format!(
                "allocations sum to {} which exceeds {}",
                total, FULL_ALLOCATION
            ))
            .into());
        }

        if !(MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&self.metrics.risk_score) {
            return Err(ValidationError::InvalidInput(format!(
                "risk score {} is outside {}-{}",
                self.metrics.risk_score, MIN_RISK_SCORE, MAX_RISK_SCORE
            ))
            .into());
        }

        Ok(())
    }
}

impl Strategy {
    /// Validates the input and creates a strategy with a fresh id.
    pub fn new(new_strategy: NewStrategy) -> Result<Self> {
        new_strategy.validate()?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: new_strategy.name.trim().to_string(),
            description: new_strategy.description,
            target_allocations: new_strategy.target_allocations,
            metrics: new_strategy.metrics,
            is_ai_generated: new_strategy.is_ai_generated,
            created_at: Utc::now().naive_utc(),
        })
    }

    /// Renames the strategy. This is the only change a strategy accepts.
    pub fn rename(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.name = name.trim().to_string();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    Ok(())
}
