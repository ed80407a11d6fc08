//! Tests for importing AI strategy drafts.

use super::*;
use crate::assets::{Asset, AssetType, RiskLevel};
use crate::errors::{Error, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "stocks".to_string(),
            name: "Stocks".to_string(),
            asset_type: AssetType::Stocks,
            current_value: dec!(5000),
            expected_return: dec!(8),
            risk_level: RiskLevel::High,
            ..Default::default()
        },
        Asset {
            id: "bonds".to_string(),
            name: "Bonds".to_string(),
            asset_type: AssetType::Bonds,
            current_value: dec!(5000),
            expected_return: dec!(2),
            risk_level: RiskLevel::Low,
            ..Default::default()
        },
    ]
}

#[test]
fn test_draft_is_normalized_to_full_allocation() {
    let draft = StrategyDraft::from_json(
        r#"{
            "name": "Tilted growth",
            "targetAllocations": { "stocks": 45, "bonds": 15 },
            "expectedReturn": 6.5,
            "riskScore": 4,
            "sharpeRatio": 0.8,
            "volatility": "14%",
            "maxDrawdown": 30
        }"#,
    )
    .unwrap();

    let strategy = draft.into_strategy(&assets()).unwrap();

    assert!(strategy.is_ai_generated);
    assert_eq!(strategy.name, "Tilted growth");
    assert_eq!(strategy.target_allocations.get("stocks"), dec!(75));
    assert_eq!(strategy.target_allocations.get("bonds"), dec!(25));
    assert_eq!(strategy.target_allocations.total(), dec!(100));
    assert_eq!(strategy.metrics.expected_return, dec!(6.5));
    assert_eq!(strategy.metrics.risk_score, 4);
    assert_eq!(strategy.metrics.sharpe_ratio, dec!(0.8));
    assert_eq!(strategy.metrics.volatility, dec!(14));
    assert_eq!(strategy.metrics.max_drawdown, dec!(30));
}

#[test]
fn test_draft_accepts_percent_strings() {
    let draft = StrategyDraft::from_json(
        r#"{ "name": "Even", "targetAllocations": { "stocks": "50%", "bonds": " 50 " } }"#,
    )
    .unwrap();

    let strategy = draft.into_strategy(&assets()).unwrap();

    assert_eq!(strategy.target_allocations.get("stocks"), dec!(50));
    assert_eq!(strategy.target_allocations.get("bonds"), dec!(50));
}

#[test]
fn test_draft_drops_unknown_assets() {
    let draft = StrategyDraft::from_json(
        r#"{ "name": "Gold bug", "targetAllocations": { "gold": 50, "stocks": 50 } }"#,
    )
    .unwrap();

    let strategy = draft.into_strategy(&assets()).unwrap();

    assert!(!strategy.target_allocations.contains("gold"));
    assert_eq!(strategy.target_allocations.get("stocks"), dec!(100));
    assert_eq!(strategy.target_allocations.get("bonds"), Decimal::ZERO);
}

#[test]
fn test_draft_derives_missing_metrics_from_assets() {
    let draft = StrategyDraft::from_json(
        r#"{ "name": "Balanced", "targetAllocations": { "stocks": 50, "bonds": 50 } }"#,
    )
    .unwrap();

    let strategy = draft.into_strategy(&assets()).unwrap();

    assert_eq!(strategy.metrics.expected_return, dec!(5));
    assert_eq!(strategy.metrics.risk_score, 3);
    assert_eq!(strategy.metrics.volatility, Decimal::ZERO);
}

#[test]
fn test_draft_clamps_risk_score() {
    let draft = StrategyDraft::from_json(
        r#"{ "name": "Wild", "targetAllocations": { "stocks": 100 }, "riskScore": 9.2 }"#,
    )
    .unwrap();

    assert_eq!(draft.into_strategy(&assets()).unwrap().metrics.risk_score, 5);
}

#[test]
fn test_draft_without_name_is_rejected() {
    let draft = StrategyDraft::from_json(r#"{ "targetAllocations": { "stocks": 100 } }"#).unwrap();

    assert!(matches!(
        draft.into_strategy(&assets()),
        Err(Error::Validation(ValidationError::MissingField(_)))
    ));
}

#[test]
fn test_draft_with_nothing_known_is_rejected() {
    let draft = StrategyDraft::from_json(
        r#"{ "name": "Elsewhere", "targetAllocations": { "gold": 100 } }"#,
    )
    .unwrap();

    assert!(matches!(
        draft.into_strategy(&assets()),
        Err(Error::Validation(ValidationError::InvalidAllocation(_)))
    ));
}

#[test]
fn test_draft_with_bad_values_is_rejected() {
    let negative = StrategyDraft::from_json(
        r#"{ "name": "Short", "targetAllocations": { "stocks": -20, "bonds": 120 } }"#,
    )
    .unwrap();
    assert!(negative.into_strategy(&assets()).is_err());

    let text = StrategyDraft::from_json(
        r#"{ "name": "Vague", "targetAllocations": { "stocks": "most of it" } }"#,
    )
    .unwrap();
    assert!(matches!(
        text.into_strategy(&assets()),
        Err(Error::Validation(ValidationError::InvalidAllocation(_)))
    ));
}

#[test]
fn test_draft_with_percentage_above_full_allocation_is_rejected() {
    let draft = StrategyDraft::from_json(
        r#"{
            "name": "Overflow",
            "targetAllocations": {
                "stocks": "79228162514264337593543950335",
                "bonds": "79228162514264337593543950335"
            }
        }"#,
    )
    .unwrap();

    assert!(matches!(
        draft.into_strategy(&assets()),
        Err(Error::Validation(ValidationError::InvalidAllocation(_)))
    ));
}

#[test]
fn test_draft_from_malformed_json_is_validation_error() {
    assert!(matches!(
        StrategyDraft::from_json("I suggest 60% stocks"),
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));
}
