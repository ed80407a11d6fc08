//! Projection domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio value at the end of a projection year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// Years from today (0 is the starting value)
    pub year: u32,
    /// Value rounded to whole monetary units
    pub value: Decimal,
}

impl ProjectionPoint {
    pub fn new(year: u32, value: Decimal) -> Self {
        Self { year, value }
    }
}

/// Projection curve for one strategy, as shown in the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyProjection {
    pub strategy_id: String,
    pub name: String,
    /// Annual return the curve was compounded at (percent)
    pub annual_return: Decimal,
    pub points: Vec<ProjectionPoint>,
    /// Value at the end of the horizon
    pub final_value: Decimal,
}
