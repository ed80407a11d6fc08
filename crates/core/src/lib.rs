//! Pacfolio Core - projection and allocation arithmetic for the portfolio dashboard.
//!
//! This crate holds the numeric core the dashboard calls into: monthly
//! compounding growth projections with recurring contributions, and the
//! interactive allocation rebalancer that keeps target percentages under
//! 100% while respecting locked assets. Every calculation is a pure function
//! over plain data; storage, rendering and the AI advisor live in the host.

pub mod allocation;
pub mod assets;
pub mod constants;
pub mod errors;
pub mod projection;
pub mod settings;
pub mod strategies;

// Re-export the types the host passes back and forth
pub use allocation::*;
pub use assets::*;
pub use projection::*;
pub use settings::PlannerSettings;
pub use strategies::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
