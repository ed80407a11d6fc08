//! Settings module - planner configuration.

mod settings_model;

pub use settings_model::PlannerSettings;
