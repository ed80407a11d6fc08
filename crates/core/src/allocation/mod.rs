//! Allocation module - target percentage maps and the interactive rebalancer.

mod allocation_calculator;
mod allocation_model;

pub use allocation_calculator::*;
pub use allocation_model::*;
