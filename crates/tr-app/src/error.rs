//! Error types for the tr-app service layer.

use tr_controls::ControlError;
use tr_values::{SensorError, ValueError};

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tr-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<tr_project::ProjectError> for AppError {
    fn from(err: tr_project::ProjectError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Reason a single config entry was skipped while building registries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid config value type '{kind}' for values.{name}")]
    UnknownValueType { name: String, kind: String },

    #[error("invalid config trigger type '{kind}' for values.{name}")]
    UnknownTriggerType { name: String, kind: String },

    #[error("{entry} is missing '{field}'")]
    MissingField { entry: String, field: &'static str },

    #[error("invalid trigger for values.{name}: {reason}")]
    InvalidTrigger { name: String, reason: String },

    #[error("no sensor for values.{name}: {source}")]
    Sensor {
        name: String,
        #[source]
        source: SensorError,
    },

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Control(#[from] ControlError),
}
