//! Boundary model for strategies proposed by the AI advisor.
//!
//! The advisor answers with loosely typed JSON: percentages may arrive as
//! numbers or strings such as `"35%"`, ids may not match any asset and the
//! allocation rarely sums to exactly 100. Nothing from a draft reaches a
//! `Strategy` without passing through `StrategyDraft::into_strategy`.

use std::collections::HashMap;
use std::str::FromStr;

use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::allocation::{normalize_allocation, AllocationMap};
use crate::assets::Asset;
use crate::constants::{FULL_ALLOCATION, MAX_RISK_SCORE, MIN_RISK_SCORE};
use crate::errors::{Result, ValidationError};
use crate::projection::weighted_return;

use super::{weighted_risk_score, NewStrategy, Strategy, StrategyMetrics};

/// Untrusted strategy as returned by the AI advisor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_allocations: HashMap<String, Value>,
    pub expected_return: Option<Value>,
    pub risk_score: Option<Value>,
    pub sharpe_ratio: Option<Value>,
    pub volatility: Option<Value>,
    pub max_drawdown: Option<Value>,
}

impl StrategyDraft {
    /// Parses a draft from the advisor's raw JSON answer.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the draft against the user's assets and builds a strategy.
    ///
    /// Ids that match no asset are dropped, the remaining percentages are
    /// rescaled to sum to 100 and missing metrics are derived from the assets.
    pub fn into_strategy(self, assets: &[Asset]) -> Result<Strategy> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ValidationError::MissingField("name".to_string()))?
            .to_string();

        let mut known = AllocationMap::new();
        for (asset_id, raw) in &self.target_allocations {
            let percentage = coerce_decimal(raw).ok_or_else(|| {
                ValidationError::InvalidAllocation(format!(
                    "allocation for '{}' is not a number: {}",
                    asset_id, raw
                ))
            })?;
            if percentage < Decimal::ZERO {
                return Err(ValidationError::InvalidAllocation(format!(
                    "allocation for '{}' is negative ({})",
                    asset_id, percentage
                ))
                .into());
            }
            if percentage > FULL_ALLOCATION {
                return Err(ValidationError::InvalidAllocation(format!(
                    "allocation for '{}' exceeds {}% ({})",
                    asset_id, FULL_ALLOCATION, percentage
                ))
                .into());
            }
            if !assets.iter().any(|asset| &asset.id == asset_id) {
                warn!(
                    "Dropping allocation of {}% for unknown asset '{}' from strategy draft '{}'",
                    percentage, asset_id, name
                );
                continue;
            }
            known.set(asset_id.clone(), percentage);
        }

        if known.total() <= Decimal::ZERO {
            return Err(ValidationError::InvalidAllocation(format!(
                "strategy draft '{}' allocates nothing to known assets",
                name
            ))
            .into());
        }

        let target_allocations = normalize_allocation(&AllocationMap::for_assets(assets, &known));
        debug!(
            "Normalized strategy draft '{}' from {}% to {}%",
            name,
            known.total(),
            target_allocations.total()
        );

        let expected_return = self
            .expected_return
            .as_ref()
            .and_then(coerce_decimal)
            .or_else(|| weighted_return(&target_allocations, assets))
            .unwrap_or(Decimal::ZERO);
        let risk_score = self
            .risk_score
            .as_ref()
            .and_then(coerce_decimal)
            .map(clamp_risk_score)
            .unwrap_or_else(|| weighted_risk_score(&target_allocations, assets));

        Strategy::new(NewStrategy {
            name,
            description: self.description,
            target_allocations,
            metrics: StrategyMetrics {
                expected_return,
                risk_score,
                sharpe_ratio: metric(&self.sharpe_ratio),
                volatility: metric(&self.volatility),
                max_drawdown: metric(&self.max_drawdown),
            },
            is_ai_generated: true,
        })
    }
}

/// Reads a number from a JSON number or a numeric string, ignoring a trailing
/// percent sign.
fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().trim_end_matches('%').trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn metric(value: &Option<Value>) -> Decimal {
    value
        .as_ref()
        .and_then(coerce_decimal)
        .unwrap_or(Decimal::ZERO)
}

fn clamp_risk_score(score: Decimal) -> u8 {
    let rounded = score
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::from(MIN_RISK_SCORE), Decimal::from(MAX_RISK_SCORE));
    rounded.to_u8().unwrap_or(MIN_RISK_SCORE)
}
