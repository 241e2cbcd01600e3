//! Control descriptor types.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Opaque description of something a control does.
///
/// Actions are kept exactly as configured; interpreting them is up to the
/// evaluator that runs the control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionDescriptor(pub serde_json::Value);

impl ActionDescriptor {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// The `type` field of an object-shaped action, if present.
    pub fn kind(&self) -> Option<&serde_json::Value> {
        self.0.get("type")
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque condition text, such as `"light_time == day"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionDescriptor(pub String);

impl ConditionDescriptor {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named control: optional setup plus ordered condition/action pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    name: String,
    setup: Option<ActionDescriptor>,
    conditions: Vec<(ConditionDescriptor, ActionDescriptor)>,
}

impl Control {
    /// Create a new control.
    ///
    /// # Arguments
    ///
    /// * `name` - Control name (must be non-empty)
    /// * `setup` - Action run once before any condition is checked
    /// * `conditions` - Condition/action pairs in evaluation order
    pub fn new(
        name: impl Into<String>,
        setup: Option<ActionDescriptor>,
        conditions: Vec<(ConditionDescriptor, ActionDescriptor)>,
    ) -> ControlResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ControlError::InvalidArg {
                what: "control name must not be empty",
            });
        }
        Ok(Self {
            name,
            setup,
            conditions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn setup(&self) -> Option<&ActionDescriptor> {
        self.setup.as_ref()
    }

    pub fn conditions(&self) -> &[(ConditionDescriptor, ActionDescriptor)] {
        &self.conditions
    }

    /// A control without conditions exists but has nothing to run.
    pub fn is_runnable(&self) -> bool {
        !self.conditions.is_empty()
    }
}
