//! Projection module - compounding growth curves for portfolios, assets and strategies.

mod projection_calculator;
mod projection_model;

pub use projection_calculator::*;
pub use projection_model::*;
