//! Tracing setup for the stepwise binary.
//!
//! The wizard draws on the alternate screen, so while it runs events go to
//! a timestamped file under `logging.dir`. The `keys` subcommand and runs
//! with `logging.to_file = false` write to stderr instead.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the file writer alive; drop it last so buffered events are flushed
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

/// Where events are written
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    File { dir: PathBuf, name: String },
    Stderr,
}

impl LogTarget {
    fn for_run(config: &Config, is_tui_mode: bool) -> Self {
        if is_tui_mode && config.logging.to_file {
            LogTarget::File {
                dir: config.logs_path(),
                name: log_filename(),
            }
        } else {
            LogTarget::Stderr
        }
    }
}

/// Effective filter directive: `--debug` beats the configured level
fn level_for(config: &Config, debug_override: bool) -> String {
    if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    }
}

fn log_filename() -> String {
    format!("stepwise-{}.log", chrono::Utc::now().format("%Y%m%dT%H%M%SZ"))
}

/// `RUST_LOG` wins over both the configured level and `--debug`
fn build_filter(config: &Config, debug_override: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(config, debug_override)))
}

pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = build_filter(config, debug_override);

    let (file_layer, stderr_layer, guard, log_file_path) =
        match LogTarget::for_run(config, is_tui_mode) {
            LogTarget::File { dir, name } => {
                std::fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create logs directory {}", dir.display())
                })?;
                let (writer, guard) =
                    tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, &name));
                let layer = fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer);
                (Some(layer), None, Some(guard), Some(dir.join(name)))
            }
            LogTarget::Stderr => {
                let layer = fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr);
                (None, Some(layer), None, None)
            }
        };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingHandle {
        _guard: guard,
        log_file_path,
    })
}
