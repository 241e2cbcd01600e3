//! Name-keyed collection of controls.

use std::collections::BTreeMap;

use crate::control::Control;
use crate::error::{ControlError, ControlResult};

/// Owns every configured control. Built once; later duplicates replace
/// earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlRegistry {
    controls: BTreeMap<String, Control>,
}

impl ControlRegistry {
    pub fn get(&self, name: &str) -> Option<&Control> {
        self.controls.get(name)
    }

    pub fn require(&self, name: &str) -> ControlResult<&Control> {
        self.get(name).ok_or_else(|| ControlError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    /// Controls that have at least one condition.
    pub fn runnable(&self) -> impl Iterator<Item = &Control> {
        self.iter().filter(|c| c.is_runnable())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl FromIterator<Control> for ControlRegistry {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self {
            controls: iter
                .into_iter()
                .map(|c| (c.name().to_string(), c))
                .collect(),
        }
    }
}
