//! Error types for control descriptors.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when building or looking up controls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// No control registered under this name.
    #[error("Unknown control: {name}")]
    NotFound { name: String },
}
