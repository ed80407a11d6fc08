//! Property-based integration tests for the allocation rebalancer and the
//! projection engine.
//!
//! These tests verify that the editor invariants hold across random
//! portfolios, lock sets and edit sequences, using the `proptest` crate for
//! random test case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pacfolio_core::{
    apply_allocation_edit, available_margin, normalize_allocation, project_growth, AllocationMap,
    Asset, AssetType, LockSet, PacFrequency, RiskLevel,
};

// =============================================================================
// Generators
// =============================================================================

fn make_assets(count: usize) -> Vec<Asset> {
    (0..count)
        .map(|i| Asset {
            id: format!("asset-{}", i),
            name: format!("Asset {}", i),
            asset_type: AssetType::Etf,
            current_value: dec!(1000),
            expected_return: dec!(5),
            risk_level: RiskLevel::Medium,
            ..Default::default()
        })
        .collect()
}

/// Generates a portfolio with a committed (100%) allocation and a lock mask.
fn arb_portfolio() -> impl Strategy<Value = (Vec<Asset>, AllocationMap, LockSet)> {
    (2usize..8)
        .prop_flat_map(|count| {
            (
                proptest::collection::vec(1u32..100, count),
                proptest::collection::vec(any::<bool>(), count),
            )
        })
        .prop_map(|(weights, lock_mask)| {
            let assets = make_assets(weights.len());
            let raw: AllocationMap = assets
                .iter()
                .zip(&weights)
                .map(|(asset, weight)| (asset.id.clone(), Decimal::from(*weight)))
                .collect();
            let locked: LockSet = assets
                .iter()
                .zip(&lock_mask)
                .filter(|(_, is_locked)| **is_locked)
                .map(|(asset, _)| asset.id.clone())
                .collect();
            (assets, normalize_allocation(&raw), locked)
        })
}

/// Generates an edit: which asset (by index) and the requested percentage,
/// with two decimal places and deliberately allowed to exceed 100.
fn arb_edits() -> impl Strategy<Value = Vec<(usize, Decimal)>> {
    proptest::collection::vec(
        (0usize..8, 0i64..15000).prop_map(|(index, cents)| (index, Decimal::new(cents, 2))),
        1..20,
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any sequence of edits from a committed allocation keeps every value
    /// non-negative and the total at or below 100.
    #[test]
    fn prop_total_never_exceeds_full_allocation(
        (assets, start, locked) in arb_portfolio(),
        edits in arb_edits()
    ) {
        let mut current = start;
        for (index, new_value) in edits {
            let edited = &assets[index % assets.len()].id;
            current = apply_allocation_edit(&current, &assets, &locked, edited, new_value);

            prop_assert!(current.total() <= dec!(100), "total {} exceeds 100", current.total());
            for (id, value) in &current {
                prop_assert!(*value >= Decimal::ZERO, "{} went negative: {}", id, value);
            }
            prop_assert_eq!(current.len(), assets.len());
        }
    }

    /// Locked assets come out of every edit exactly as they went in.
    #[test]
    fn prop_locked_assets_never_move(
        (assets, start, locked) in arb_portfolio(),
        edits in arb_edits()
    ) {
        let mut current = start;
        for (index, new_value) in edits {
            let edited = &assets[index % assets.len()].id;
            let next = apply_allocation_edit(&current, &assets, &locked, edited, new_value);

            for id in locked.iter() {
                prop_assert_eq!(next.get(id), current.get(id));
            }
            current = next;
        }
    }

    /// Re-applying an asset's current value changes nothing.
    #[test]
    fn prop_edit_to_current_value_is_identity(
        (assets, start, locked) in arb_portfolio(),
        index in 0usize..8
    ) {
        let edited = &assets[index % assets.len()].id;
        let result = apply_allocation_edit(&start, &assets, &locked, edited, start.get(edited));

        prop_assert_eq!(result, start);
    }

    /// Moving an unlocked asset to its available margin fills the allocation
    /// to exactly 100.
    #[test]
    fn prop_margin_edit_reaches_full_allocation(
        (assets, start, locked) in arb_portfolio(),
        edits in arb_edits(),
        index in 0usize..8
    ) {
        let mut current = start;
        for (edit_index, new_value) in edits {
            let edited = &assets[edit_index % assets.len()].id;
            current = apply_allocation_edit(&current, &assets, &locked, edited, new_value);
        }

        let target = &assets[index % assets.len()].id;
        prop_assume!(!locked.contains(target));

        let margin = available_margin(target, &current, &assets, &locked);
        let result = apply_allocation_edit(&current, &assets, &locked, target, margin);

        prop_assert_eq!(result.total(), dec!(100));
        prop_assert_eq!(result.get(target), margin);
    }

    /// Projections emit one point per year and never shrink when both the
    /// return and the contributions are non-negative.
    #[test]
    fn prop_projection_is_monotonic_for_non_negative_inputs(
        initial in 0i64..1_000_000,
        rate_bp in 0i64..2500,
        monthly in 0i64..5000,
        years in 0i32..50
    ) {
        let assets = vec![Asset {
            id: "pac".to_string(),
            is_pac: true,
            pac_amount: Some(Decimal::from(monthly)),
            pac_frequency: Some(PacFrequency::Monthly),
            ..Default::default()
        }];

        let points = project_growth(Decimal::from(initial), Decimal::new(rate_bp, 2), years, &assets);

        prop_assert_eq!(points.len(), years as usize + 1);
        prop_assert_eq!(points[0].value, Decimal::from(initial));
        for pair in points.windows(2) {
            prop_assert!(pair[1].value >= pair[0].value);
            prop_assert_eq!(pair[1].year, pair[0].year + 1);
        }
    }
}
