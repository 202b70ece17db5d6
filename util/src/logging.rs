//! Logging bootstrap shared by the binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! binary's job.

use std::fs;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config;

/// Installs the global subscriber: a daily-rolling file layer under `logs/`
/// and, when `LOG_TO_STDOUT` is set, a stdout layer.
///
/// The returned guard flushes the non-blocking writer on drop, so keep it alive
/// for the lifetime of the process.
pub fn init_logging(log_file: &str, log_level: &str) -> WorkerGuard {
    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config::log_to_stdout().then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer);

    if registry.try_init().is_err() {
        eprintln!("logging already initialised, keeping the existing subscriber");
    } else {
        tracing::info!(log_file, "logging initialised");
    }

    guard
}
