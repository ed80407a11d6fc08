//! Strategies module - saved target allocations, snapshots, comparisons and AI drafts.

mod strategies_model;
mod strategies_service;
mod strategy_draft;

pub use strategies_model::{NewStrategy, Strategy, StrategyMetrics};
pub use strategies_service::*;
pub use strategy_draft::StrategyDraft;


#[cfg(test)]
mod strategy_draft_tests;
