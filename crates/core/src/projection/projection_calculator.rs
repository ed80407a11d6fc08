//! Growth projection with monthly compounding and recurring contributions.

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::allocation::AllocationMap;
use crate::assets::Asset;
use crate::constants::{MAX_HORIZON_YEARS, MONTHS_PER_YEAR};
use crate::strategies::Strategy;

use super::ProjectionPoint;

/// Projects a portfolio value year by year.
///
/// The annual rate is compounded monthly. Each month the combined recurring
/// contribution of all PAC assets is added first, then the month's growth is
/// applied. Values keep full precision between months and are rounded to
/// whole units only when a year is emitted.
///
/// The result always starts with the year-0 point; a horizon of zero or less
/// yields that point alone.
///
/// # Arguments
///
/// * `initial_value` - Starting portfolio value.
/// * `annual_return_percent` - Nominal annual return, e.g. `7` for 7%.
/// * `years` - Projection horizon.
/// * `assets` - Read only for their contribution schedules.
pub fn project_growth(
    initial_value: Decimal,
    annual_return_percent: Decimal,
    years: i32,
    assets: &[Asset],
) -> Vec<ProjectionPoint> {
    let horizon = u32::try_from(years).unwrap_or(0);
    let monthly_rate = annual_return_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    let growth_factor = Decimal::ONE + monthly_rate;
    let monthly_contribution = total_monthly_contribution(assets);

    let mut points = Vec::with_capacity(horizon.min(MAX_HORIZON_YEARS) as usize + 1);
    let mut current_value = initial_value;
    points.push(ProjectionPoint::new(0, round_to_unit(current_value)));

    let mut saturated = false;
    for year in 1..=horizon {
        for _ in 0..MONTHS_PER_YEAR {
            current_value = current_value
                .checked_add(monthly_contribution)
                .and_then(|value| value.checked_mul(growth_factor))
                .unwrap_or_else(|| {
                    saturated = true;
                    Decimal::MAX
                });
        }
        points.push(ProjectionPoint::new(year, round_to_unit(current_value)));
    }

    if saturated {
        warn!(
            "Projection at {}% over {} years exceeded the representable range; values were capped",
            annual_return_percent, horizon
        );
    }

    points
}

/// Sum of the monthly equivalents of every asset's recurring contribution.
pub fn total_monthly_contribution(assets: &[Asset]) -> Decimal {
    assets.iter().map(Asset::monthly_contribution).sum()
}

/// Total current value of the portfolio.
pub fn portfolio_value(assets: &[Asset]) -> Decimal {
    assets.iter().map(|asset| asset.current_value).sum()
}

/// Current-value-weighted average of the assets' expected returns.
///
/// Zero for a portfolio with no value.
pub fn portfolio_return(assets: &[Asset]) -> Decimal {
    let total_value = portfolio_value(assets);
    if total_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let weighted: Decimal = assets
        .iter()
        .map(|asset| asset.current_value * asset.expected_return)
        .sum();
    weighted / total_value
}

/// Return of an allocation, weighting each asset's expected return by its
/// target percentage.
///
/// Only ids present in both the allocation and `assets` count, and the result
/// is normalized by their combined percentage, so an allocation that does not
/// sum to exactly 100 still yields a proper average. Returns `None` when no
/// known asset has a positive allocation.
pub fn weighted_return(allocations: &AllocationMap, assets: &[Asset]) -> Option<Decimal> {
    let (weighted, covered) = assets.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(weighted, covered), asset| {
            let percentage = allocations.get(&asset.id);
            if percentage > Decimal::ZERO {
                (
                    weighted + percentage * asset.expected_return,
                    covered + percentage,
                )
            } else {
                (weighted, covered)
            }
        },
    );

    if covered > Decimal::ZERO {
        Some(weighted / covered)
    } else {
        None
    }
}

/// Annual return used to project a strategy: its allocation-weighted return,
/// or the strategy's stored expected return when the allocation references no
/// known asset.
pub fn strategy_return(strategy: &Strategy, assets: &[Asset]) -> Decimal {
    weighted_return(&strategy.target_allocations, assets)
        .unwrap_or(strategy.metrics.expected_return)
}

/// Projects the current portfolio value as if it followed `strategy`.
pub fn project_strategy(strategy: &Strategy, assets: &[Asset], years: i32) -> Vec<ProjectionPoint> {
    project_growth(
        portfolio_value(assets),
        strategy_return(strategy, assets),
        years,
        assets,
    )
}

/// Projects the whole portfolio at its value-weighted return.
pub fn project_portfolio(assets: &[Asset], years: i32) -> Vec<ProjectionPoint> {
    project_growth(
        portfolio_value(assets),
        portfolio_return(assets),
        years,
        assets,
    )
}

/// Projects a single asset from its own value, rate and contribution plan.
pub fn project_asset(asset: &Asset, years: i32) -> Vec<ProjectionPoint> {
    project_growth(
        asset.current_value,
        asset.expected_return,
        years,
        std::slice::from_ref(asset),
    )
}

fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
