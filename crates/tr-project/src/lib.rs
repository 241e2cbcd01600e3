//! tr-project: terrarium config file format and lint.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ConfigIssue, lint_config};

use std::path::{Path, PathBuf};

use tracing::debug;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Unsupported config format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_json_str(content: &str) -> ProjectResult<ConfigDef> {
    Ok(serde_json::from_str(content)?)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<ConfigDef> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn load_json(path: &Path) -> ProjectResult<ConfigDef> {
    let content = std::fs::read_to_string(path)?;
    let config = from_json_str(&content)?;
    debug!("loaded config {}", path.display());
    Ok(config)
}

pub fn save_json(path: &Path, config: &ConfigDef) -> ProjectResult<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<ConfigDef> {
    let content = std::fs::read_to_string(path)?;
    let config = from_yaml_str(&content)?;
    debug!("loaded config {}", path.display());
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &ConfigDef) -> ProjectResult<()> {
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a config file, choosing the format from its extension.
pub fn load_config(path: &Path) -> ProjectResult<ConfigDef> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => load_json(path),
        Some("yaml" | "yml") => load_yaml(path),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
