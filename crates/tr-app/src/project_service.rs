//! Config loading, lint, and introspection.

use std::path::Path;
use std::time::Duration;

use tr_controls::ControlRegistry;
use tr_project::{ConfigDef, ConfigIssue};
use tr_values::{ValueKind, ValueRegistry};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::factory::{ConfigFactory, Runtime};

/// Summary of a value for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSummary {
    pub name: String,
    pub kind: ValueKind,
    pub period: Option<Duration>,
}

/// Summary of a control for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSummary {
    pub name: String,
    pub has_setup: bool,
    pub condition_count: usize,
    pub runnable: bool,
}

/// Load a config file (`.json`, `.yaml` or `.yml`).
pub fn load_config(path: &Path) -> AppResult<ConfigDef> {
    let config = tr_project::load_config(path)?;
    info!(
        "loaded {}: {} values, {} controls",
        path.display(),
        config.values.len(),
        config.controls.len()
    );
    Ok(config)
}

/// Lint a config, logging each issue as a warning.
pub fn lint(config: &ConfigDef) -> Vec<ConfigIssue> {
    let issues = tr_project::lint_config(config);
    for issue in &issues {
        warn!("{}", issue);
    }
    issues
}

/// Load a config file and build its registries.
pub fn load_runtime(path: &Path, factory: &ConfigFactory) -> AppResult<Runtime> {
    let config = load_config(path)?;
    let runtime = factory.build(&config);
    info!(
        "built {} values, {} controls ({} entries skipped)",
        runtime.values.len(),
        runtime.controls.len(),
        runtime.report.skipped.len()
    );
    Ok(runtime)
}

/// List all values with summaries, ordered by name.
pub fn list_values(values: &ValueRegistry) -> Vec<ValueSummary> {
    values
        .iter()
        .map(|value| ValueSummary {
            name: value.name().to_string(),
            kind: value.kind(),
            period: value.period(),
        })
        .collect()
}

/// List all controls with summaries, ordered by name.
pub fn list_controls(controls: &ControlRegistry) -> Vec<ControlSummary> {
    controls
        .iter()
        .map(|control| ControlSummary {
            name: control.name().to_string(),
            has_setup: control.setup().is_some(),
            condition_count: control.conditions().len(),
            runnable: control.is_runnable(),
        })
        .collect()
}
