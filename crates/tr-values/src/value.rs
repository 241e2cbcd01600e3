//! The value hierarchy and its read/write contract.

use core::fmt;
use std::time::Duration;

use tracing::{error, info};

use crate::datum::Datum;
use crate::error::{ValueError, ValueResult};
use crate::indicator::Indicator;

/// Names the variant behind a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Constant,
    Variable,
    TimeIndicator,
    GpioIndicator,
}

impl ValueKind {
    pub fn is_indicator(self) -> bool {
        matches!(self, Self::TimeIndicator | Self::GpioIndicator)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, Self::Variable)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::TimeIndicator => "time indicator",
            Self::GpioIndicator => "gpio indicator",
        };
        f.write_str(s)
    }
}

/// Fixed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: String,
    payload: Datum,
}

impl Constant {
    pub fn new(name: impl Into<String>, payload: Datum) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self) -> Datum {
        self.payload.clone()
    }
}

/// User-settable payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    payload: Datum,
}

impl Variable {
    pub fn new(name: impl Into<String>, default: Datum) -> Self {
        Self {
            name: name.into(),
            payload: default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self) -> Datum {
        self.payload.clone()
    }

    /// Replace the payload, returning the previous one.
    pub fn write(&mut self, x: Datum) -> Datum {
        info!("values.{} updated {} -> {}", self.name, self.payload, x);
        std::mem::replace(&mut self.payload, x)
    }
}

/// A named value of any kind.
#[derive(Debug)]
pub enum Value {
    Constant(Constant),
    Variable(Variable),
    Indicator(Indicator),
}

impl Value {
    pub fn name(&self) -> &str {
        match self {
            Self::Constant(v) => v.name(),
            Self::Variable(v) => v.name(),
            Self::Indicator(v) => v.name(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Constant(_) => ValueKind::Constant,
            Self::Variable(_) => ValueKind::Variable,
            Self::Indicator(Indicator::Time(_)) => ValueKind::TimeIndicator,
            Self::Indicator(Indicator::Gpio(_)) => ValueKind::GpioIndicator,
        }
    }

    /// Advisory re-read interval; only indicators carry one.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Self::Indicator(v) => v.period(),
            Self::Constant(_) | Self::Variable(_) => None,
        }
    }

    /// Current payload. Indicators compute it on every call.
    pub fn read(&mut self) -> ValueResult<Datum> {
        match self {
            Self::Constant(v) => Ok(v.read()),
            Self::Variable(v) => Ok(v.read()),
            Self::Indicator(v) => v.read(),
        }
    }

    /// Replace the payload. Only variables accept writes; a rejected write
    /// leaves the value untouched.
    pub fn write(&mut self, x: Datum) -> ValueResult<()> {
        match self {
            Self::Variable(v) => {
                v.write(x);
                Ok(())
            }
            Self::Constant(v) => {
                error!("can't set constant values.{}", v.name());
                Err(ValueError::Immutable {
                    name: v.name().to_string(),
                })
            }
            Self::Indicator(v) => {
                error!("can't set value for indicator values.{}", v.name());
                Err(ValueError::ReadOnlyIndicator {
                    name: v.name().to_string(),
                })
            }
        }
    }
}

impl From<Constant> for Value {
    fn from(v: Constant) -> Self {
        Self::Constant(v)
    }
}

impl From<Variable> for Value {
    fn from(v: Variable) -> Self {
        Self::Variable(v)
    }
}

impl From<Indicator> for Value {
    fn from(v: Indicator) -> Self {
        Self::Indicator(v)
    }
}
