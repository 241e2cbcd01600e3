//! Logging initialisation.
//!
//! `RUST_LOG` overrides the default `info` filter, e.g.
//! `RUST_LOG=tr_values=debug`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tr_app::AppResult;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn timer() -> ChronoLocal {
    ChronoLocal::new(TIMESTAMP_FORMAT.to_string())
}

/// Log to stderr, and also append to `log_file` when one is given.
pub fn init(log_file: Option<&Path>) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer()
        .with_timer(timer())
        .with_target(false)
        .with_writer(std::io::stderr);

    let file = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_timer(timer())
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_receives_events() {
        let path = std::env::temp_dir().join(format!("tr_cli_log_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        init(Some(&path)).unwrap();
        tracing::warn!("log file marker");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("log file marker"));
        let _ = std::fs::remove_file(&path);
    }
}
