//! Interactive allocation rebalancing.
//!
//! Every function here is pure: it reads the current allocation, lock set and
//! asset list and returns a fresh value. The host replaces its editor state
//! with the result on each slider or input change.

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::assets::Asset;
use crate::constants::{ALLOCATION_PRECISION, FULL_ALLOCATION};

use super::{AllocationMap, AllocationStatus, LockSet};

/// Applies a user edit to one asset's allocation and rebalances the rest.
///
/// The returned map has one entry per asset in `assets`. Its total never
/// exceeds 100 when the input total did not, locked assets keep their exact
/// input value and no allocation goes below zero.
///
/// * If the edited total still fits under 100, only the edited asset moves.
/// * Otherwise the excess is taken from the unlocked assets in proportion to
///   their current allocation.
/// * If the unlocked assets cannot absorb the excess, the edited asset is
///   capped at whatever room the locked and unlocked assets leave.
///
/// The requested value is clamped to 0-100. Editing a locked asset, or an id
/// that is not in `assets`, leaves the allocation untouched.
pub fn apply_allocation_edit(
    current: &AllocationMap,
    assets: &[Asset],
    locked: &LockSet,
    edited_asset_id: &str,
    new_value: Decimal,
) -> AllocationMap {
    let mut allocations = AllocationMap::for_assets(assets, current);

    if !allocations.contains(edited_asset_id) {
        debug!(
            "Ignoring allocation edit for unknown asset {}",
            edited_asset_id
        );
        return allocations;
    }
    if locked.contains(edited_asset_id) {
        debug!(
            "Ignoring allocation edit for locked asset {}",
            edited_asset_id
        );
        return allocations;
    }

    let new_value = new_value.clamp(Decimal::ZERO, FULL_ALLOCATION);
    let old_value = allocations.get(edited_asset_id);
    let current_total = allocations.total();
    let new_total = current_total - old_value + new_value;

    if new_total <= FULL_ALLOCATION {
        allocations.set(edited_asset_id, new_value);
        return allocations;
    }

    let excess = new_total - FULL_ALLOCATION;
    let unlockable: Vec<(String, Decimal)> = allocations
        .iter()
        .filter(|(id, _)| id.as_str() != edited_asset_id && !locked.contains(id))
        .map(|(id, value)| (id.clone(), *value))
        .collect();
    let unlockable_total: Decimal = unlockable.iter().map(|(_, value)| *value).sum();

    if unlockable_total >= excess {
        allocations.set(edited_asset_id, new_value);

        if unlockable_total > Decimal::ZERO {
            let retained = unlockable_total - excess;
            for (id, value) in unlockable {
                // value - excess * value / unlockable_total, truncated so the
                // rounded shares never add up to more than `retained`
                let reduced = (value * retained / unlockable_total)
                    .round_dp_with_strategy(ALLOCATION_PRECISION, RoundingStrategy::ToZero)
                    .max(Decimal::ZERO);
                allocations.set(id, reduced);
            }
        }
    } else {
        let locked_total = locked_total_excluding(&allocations, locked, edited_asset_id);
        let max_possible = (FULL_ALLOCATION - locked_total - unlockable_total).max(Decimal::ZERO);
        debug!(
            "Capping allocation for {} at {} (requested {}, excess {} exceeds unlocked {})",
            edited_asset_id, max_possible, new_value, excess, unlockable_total
        );
        allocations.set(edited_asset_id, max_possible);
    }

    allocations
}

/// Highest allocation `asset_id` can reach in one edit without pushing the
/// total over 100, given the live state of every other asset.
///
/// A locked asset cannot move, so its margin is its current allocation.
pub fn available_margin(
    asset_id: &str,
    current: &AllocationMap,
    assets: &[Asset],
    locked: &LockSet,
) -> Decimal {
    let allocations = AllocationMap::for_assets(assets, current);
    let current_allocation = allocations.get(asset_id);

    if locked.contains(asset_id) {
        return current_allocation;
    }

    let current_total = allocations.total();
    let unlockable_others: Decimal = allocations
        .iter()
        .filter(|(id, _)| id.as_str() != asset_id && !locked.contains(id))
        .map(|(_, value)| *value)
        .sum();

    (current_allocation + unlockable_others + (FULL_ALLOCATION - current_total))
        .min(FULL_ALLOCATION)
        .max(Decimal::ZERO)
}

/// Validation summary for an allocation against the 100% target.
pub fn allocation_status(allocations: &AllocationMap, tolerance: Decimal) -> AllocationStatus {
    allocations.status(tolerance)
}

/// Allocation implied by the assets' current values.
///
/// A portfolio with no value yields an all-zero allocation.
pub fn allocation_from_values(assets: &[Asset]) -> AllocationMap {
    let values: AllocationMap = assets
        .iter()
        .map(|asset| (asset.id.clone(), asset.current_value.max(Decimal::ZERO)))
        .collect();
    normalize_allocation(&values)
}

/// Rescales an allocation so it sums to exactly 100.
///
/// Shares are truncated to the allocation precision and the rounding residue
/// is given to the largest entry (lowest id on ties). Negative entries count
/// as zero. An allocation with nothing positive comes back all zero.
pub fn normalize_allocation(allocations: &AllocationMap) -> AllocationMap {
    let total: Decimal = allocations
        .iter()
        .map(|(_, value)| (*value).max(Decimal::ZERO))
        .sum();

    if total <= Decimal::ZERO {
        return allocations
            .iter()
            .map(|(id, _)| (id.clone(), Decimal::ZERO))
            .collect();
    }

    let mut normalized: AllocationMap = allocations
        .iter()
        .map(|(id, value)| {
            let share = ((*value).max(Decimal::ZERO) / total * FULL_ALLOCATION)
                .round_dp_with_strategy(ALLOCATION_PRECISION, RoundingStrategy::ToZero);
            (id.clone(), share)
        })
        .collect();

    let residue = FULL_ALLOCATION - normalized.total();
    if residue > Decimal::ZERO {
        let largest = normalized
            .iter()
            .max_by(|(id_a, a), (id_b, b)| a.cmp(b).then_with(|| id_b.cmp(id_a)))
            .map(|(id, value)| (id.clone(), *value));
        if let Some((id, value)) = largest {
            normalized.set(id, value + residue);
        }
    }

    normalized
}

fn locked_total_excluding(
    allocations: &AllocationMap,
    locked: &LockSet,
    excluded_asset_id: &str,
) -> Decimal {
    allocations
        .iter()
        .filter(|(id, _)| id.as_str() != excluded_asset_id && locked.contains(id))
        .map(|(_, value)| *value)
        .sum()
}
