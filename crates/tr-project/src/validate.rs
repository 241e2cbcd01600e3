//! Config lint.
//!
//! Nothing reported here stops a config from loading. Each issue points at
//! something that will be skipped, overwritten, or can never match.

use std::collections::HashSet;

use tr_core::{Interval, TimeFormat, UnitWeights};

use crate::schema::{ConfigDef, TriggerClass, ValueClass, ValueDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("Duplicate value name: {name} (the later entry wins)")]
    DuplicateValue { name: String },

    #[error("Duplicate control name: {name} (the later entry wins)")]
    DuplicateControl { name: String },

    #[error("Value entry {index} has no name")]
    UnnamedValue { index: usize },

    #[error("Control entry {index} has no name")]
    UnnamedControl { index: usize },

    #[error("Unknown value type '{kind}' for {name}")]
    UnknownValueType { name: String, kind: String },

    #[error("Unknown trigger type '{kind}' for {name}")]
    UnknownTriggerType { name: String, kind: String },

    #[error("Invalid trigger for {name}: {reason}")]
    InvalidTrigger { name: String, reason: String },

    #[error("Range {index} of {name} is empty: {range}")]
    EmptyRange {
        name: String,
        index: usize,
        range: String,
    },
}

pub fn lint_config(config: &ConfigDef) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let mut value_names = HashSet::new();
    for (index, value) in config.values.iter().enumerate() {
        let Some(name) = value.name.as_deref() else {
            issues.push(ConfigIssue::UnnamedValue { index });
            continue;
        };
        if !value_names.insert(name) {
            issues.push(ConfigIssue::DuplicateValue {
                name: name.to_string(),
            });
        }
        match value.class() {
            ValueClass::Unknown(kind) => issues.push(ConfigIssue::UnknownValueType {
                name: name.to_string(),
                kind,
            }),
            ValueClass::Indicator => lint_indicator(name, value, &mut issues),
            ValueClass::Variable | ValueClass::Constant => {}
        }
    }

    let mut control_names = HashSet::new();
    for (index, control) in config.controls.iter().enumerate() {
        let Some(name) = control.name.as_deref() else {
            issues.push(ConfigIssue::UnnamedControl { index });
            continue;
        };
        if !control_names.insert(name) {
            issues.push(ConfigIssue::DuplicateControl {
                name: name.to_string(),
            });
        }
    }

    issues
}

fn lint_indicator(name: &str, value: &ValueDef, issues: &mut Vec<ConfigIssue>) {
    let invalid = |reason: String| ConfigIssue::InvalidTrigger {
        name: name.to_string(),
        reason,
    };
    let Some(trigger) = &value.trigger else {
        issues.push(invalid("missing trigger".to_string()));
        return;
    };

    match trigger.class() {
        TriggerClass::Unknown(kind) => issues.push(ConfigIssue::UnknownTriggerType {
            name: name.to_string(),
            kind,
        }),
        TriggerClass::Time => match trigger.time() {
            Err(e) => issues.push(invalid(e.to_string())),
            Ok(time) => {
                let format = TimeFormat::parse(&time.timeformat);
                let weights = UnitWeights::default();
                for (index, range) in time.ranges.iter().enumerate() {
                    let bounds = format
                        .decode(&range.a, &weights)
                        .and_then(|a| Ok((a, format.decode(&range.b, &weights)?)));
                    match bounds {
                        Err(e) => issues.push(invalid(e.to_string())),
                        Ok((a, b)) if Interval::new(a, b).is_empty() => {
                            issues.push(ConfigIssue::EmptyRange {
                                name: name.to_string(),
                                index,
                                range: format!("[{}, {})", range.a, range.b),
                            });
                        }
                        Ok(_) => {}
                    }
                }
            }
        },
        TriggerClass::Gpio => match trigger.gpio() {
            Err(e) => issues.push(invalid(e.to_string())),
            Ok(gpio) => {
                if gpio.samples == 0 {
                    issues.push(invalid("samples must be positive".to_string()));
                }
                for (index, range) in gpio.ranges.iter().enumerate() {
                    let interval = Interval::new(range.a, range.b);
                    if interval.is_empty() {
                        issues.push(ConfigIssue::EmptyRange {
                            name: name.to_string(),
                            index,
                            range: interval.to_string(),
                        });
                    }
                }
            }
        },
    }
}
