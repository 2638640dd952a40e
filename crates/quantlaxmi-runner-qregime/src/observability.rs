//! # Structured Logging
//!
//! ## Logging Architecture
//! - **stderr**: WARN only; stdout carries the report
//! - **file**: INFO for quantlaxmi crates, WARN for deps (daily rotation)
//! - **RUST_LOG**: Honored for file logs only; stderr always bounded to WARN

use std::{fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default file filter when RUST_LOG is unset.
pub const DEFAULT_FILE_FILTER: &str = "quantlaxmi=info,warn";

/// Guards that must be held for the lifetime of the process.
/// Dropping this will cause buffered logs to be lost.
pub struct TracingGuards {
    _file_guard: WorkerGuard,
}

/// Ensures the logs directory exists.
fn ensure_logs_dir(dir: &Path) {
    if !dir.exists() {
        // Best effort: if this fails, we still want stdout logs to work.
        let _ = fs::create_dir_all(dir);
    }
}

/// Initializes tracing with bounded stderr + rotated file logs.
///
/// # Returns
/// `TracingGuards` - Must be held for the lifetime of the process or logs may be lost.
///
/// # Parameters
/// * `service_name` - Identifier for the current executing binary/context.
/// * `log_dir` - Directory for `{service_name}.log`.
pub fn init_tracing(service_name: &str, log_dir: &Path) -> TracingGuards {
    ensure_logs_dir(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, format!("{}.log", service_name));
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let stdout_filter = EnvFilter::new("warn");
    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILE_FILTER));

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_filter(stdout_filter);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_filter(file_filter);

    // Keeps the first subscriber if one is already installed.
    let _ = tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    tracing::info!(
        "Observability initialized for service: {} (stderr=WARN, file={}/{}.log)",
        service_name,
        log_dir.display(),
        service_name
    );

    TracingGuards {
        _file_guard: file_guard,
    }
}
