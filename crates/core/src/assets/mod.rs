//! Assets module - holding models and input validation.

mod assets_model;

pub use assets_model::{Asset, AssetType, NewAsset, PacFrequency, RiskLevel};
