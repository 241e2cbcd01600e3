//! Error types for value access.

use thiserror::Error;
use tr_core::CoreError;

/// Result type for value operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors raised when reading, writing or constructing values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// Write attempted on a constant.
    #[error("Can't set constant values.{name}")]
    Immutable { name: String },

    /// Write attempted on a computed indicator.
    #[error("Can't set indicator values.{name}: indicators are read-only")]
    ReadOnlyIndicator { name: String },

    /// The indicator input fell outside every configured range.
    #[error("Couldn't find {input} in ranges for values.{name}")]
    RangeNotFound { name: String, input: String },

    /// A configured time range bound does not match the time format.
    #[error("Invalid time range for values.{name}: {source}")]
    TimeParse {
        name: String,
        #[source]
        source: CoreError,
    },

    /// The sensor behind an indicator failed.
    #[error("Sensor read failed for values.{name}: {source}")]
    SensorRead {
        name: String,
        #[source]
        source: SensorError,
    },

    /// No value registered under this name.
    #[error("Unknown value: {name}")]
    NotFound { name: String },

    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

/// Errors reported by a sample source.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SensorError {
    #[error("No sensor available on pin {pin}")]
    Unavailable { pin: u32 },

    #[error("Sensor read failed: {what}")]
    Read { what: String },
}
