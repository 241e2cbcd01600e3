//! Shared application service layer for terrarium.
//!
//! This crate turns a parsed config into live registries and gives front
//! ends (the CLI today) one place to load, lint and inspect configs.

pub mod error;
pub mod factory;
pub mod project_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult, BuildError};
pub use factory::{BuildReport, ConfigFactory, Runtime};
pub use project_service::{
    ControlSummary, ValueSummary, list_controls, list_values, lint, load_config, load_runtime,
};
