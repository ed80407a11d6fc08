//! Strategy book, current-portfolio snapshot and strategy comparison.

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::allocation::{allocation_from_values, AllocationMap};
use crate::assets::{Asset, RiskLevel};
use crate::constants::{MAX_RISK_SCORE, MIN_RISK_SCORE};
use crate::errors::{Error, Result, ValidationError};
use crate::projection::{
    portfolio_return, portfolio_value, project_growth, strategy_return, StrategyProjection,
};
use crate::settings::PlannerSettings;

use super::{NewStrategy, Strategy, StrategyMetrics};

/// Ordered list of the user's saved strategies.
///
/// The host owns the book and persists it however it likes; this type only
/// enforces the lifecycle rules: strategies are added whole, renamed, or
/// deleted, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyBook {
    strategies: Vec<Strategy>,
}

impl StrategyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a new strategy.
    pub fn create(&mut self, new_strategy: NewStrategy) -> Result<&Strategy> {
        let strategy = Strategy::new(new_strategy)?;
        self.add(strategy)
    }

    /// Stores an already-built strategy (snapshot, AI draft, restored state).
    pub fn add(&mut self, strategy: Strategy) -> Result<&Strategy> {
        if self.strategies.iter().any(|s| s.id == strategy.id) {
            return Err(ValidationError::InvalidInput(format!(
                "strategy {} already exists",
                strategy.id
            ))
            .into());
        }
        debug!("Adding strategy {} ({})", strategy.name, strategy.id);
        self.strategies.push(strategy);
        self.strategies
            .last()
            .ok_or_else(|| Error::Unexpected("strategy was not stored".to_string()))
    }

    pub fn get(&self, strategy_id: &str) -> Result<&Strategy> {
        self.strategies
            .iter()
            .find(|s| s.id == strategy_id)
            .ok_or_else(|| Error::NotFound(format!("Strategy {} not found", strategy_id)))
    }

    pub fn rename(&mut self, strategy_id: &str, name: &str) -> Result<&Strategy> {
        let strategy = self
            .strategies
            .iter_mut()
            .find(|s| s.id == strategy_id)
            .ok_or_else(|| Error::NotFound(format!("Strategy {} not found", strategy_id)))?;
        strategy.rename(name)?;
        Ok(strategy)
    }

    /// Removes a strategy and hands it back.
    pub fn delete(&mut self, strategy_id: &str) -> Result<Strategy> {
        let index = self
            .strategies
            .iter()
            .position(|s| s.id == strategy_id)
            .ok_or_else(|| Error::NotFound(format!("Strategy {} not found", strategy_id)))?;
        debug!("Deleting strategy {}", strategy_id);
        Ok(self.strategies.remove(index))
    }

    pub fn list(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl From<Vec<Strategy>> for StrategyBook {
    fn from(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }
}

/// Captures the portfolio as it stands today as a strategy.
///
/// The target allocation is each asset's share of current value and the
/// expected return is the value-weighted return. Sharpe ratio, volatility and
/// drawdown are left at zero: the planner does not estimate them.
pub fn snapshot_current_portfolio(name: &str, assets: &[Asset]) -> Result<Strategy> {
    let target_allocations = allocation_from_values(assets);
    let risk_score = weighted_risk_score(&target_allocations, assets);

    Strategy::new(NewStrategy {
        name: name.to_string(),
        description: None,
        target_allocations,
        metrics: StrategyMetrics {
            expected_return: portfolio_return(assets),
            risk_score,
            ..Default::default()
        },
        is_ai_generated: false,
    })
}

/// Projects every strategy from today's portfolio value over the same horizon.
///
/// The horizon is capped at the configured maximum. Rows come back in the
/// order the strategies were given.
pub fn compare_strategies(
    strategies: &[Strategy],
    assets: &[Asset],
    years: i32,
    settings: &PlannerSettings,
) -> Vec<StrategyProjection> {
    let horizon = settings.clamp_horizon(years);
    let initial_value = portfolio_value(assets);

    strategies
        .iter()
        .map(|strategy| {
            let annual_return = strategy_return(strategy, assets);
            let points = project_growth(initial_value, annual_return, horizon, assets);
            let final_value = points.last().map(|p| p.value).unwrap_or(initial_value);
            StrategyProjection {
                strategy_id: strategy.id.clone(),
                name: strategy.name.clone(),
                annual_return,
                points,
                final_value,
            }
        })
        .collect()
}

/// Allocation-weighted risk of the assets on the 1-5 strategy scale
/// (low = 1, medium = 3, high = 5).
///
/// An allocation with no weight on known assets scores as medium.
pub fn weighted_risk_score(allocations: &AllocationMap, assets: &[Asset]) -> u8 {
    let (weighted, covered) = assets.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(weighted, covered), asset| {
            let percentage = allocations.get(&asset.id);
            if percentage > Decimal::ZERO {
                (
                    weighted + percentage * asset.risk_level.score(),
                    covered + percentage,
                )
            } else {
                (weighted, covered)
            }
        },
    );

    let score = if covered > Decimal::ZERO {
        weighted / covered
    } else {
        RiskLevel::Medium.score()
    };

    score
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(MIN_RISK_SCORE)
        .clamp(MIN_RISK_SCORE, MAX_RISK_SCORE)
}
