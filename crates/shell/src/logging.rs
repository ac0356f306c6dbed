// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup: a console layer at `loglevel_console` and, when
//! `logfile` is non-empty, a non-blocking file layer at `loglevel_file`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use configshell_core::Preferences;

/// Installs the global subscriber from the store's `loglevel_console`,
/// `loglevel_file`, and `logfile` preferences, falling back to `info`
/// console-only when those keys are absent or unparseable.
///
/// Returns the file layer's [`WorkerGuard`] when a log file is
/// configured; the caller must hold it for the process lifetime, since
/// dropping it stops the background flush thread.
pub fn init(prefs: &Preferences) -> Option<WorkerGuard> {
    let console_level = prefs.get("loglevel_console").and_then(|v| v.as_str().map(str::to_string)).unwrap_or_else(|| "info".to_string());
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level));
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let logfile = prefs.get("logfile").and_then(|v| v.as_str().map(str::to_string)).filter(|s| !s.is_empty());

    match logfile {
        Some(path) => {
            let file_level = prefs.get("loglevel_file").and_then(|v| v.as_str().map(str::to_string)).unwrap_or_else(|| "debug".to_string());
            let (appender, guard) = file_appender(Path::new(&path));
            let file_layer = fmt::layer().with_writer(appender).with_ansi(false).with_target(true).with_filter(EnvFilter::new(file_level));

            tracing_subscriber::registry()
                .with(console_layer.with_filter(console_filter))
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(console_layer.with_filter(console_filter)).init();
            None
        }
    }
}

fn file_appender(path: &Path) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let filename = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| "log.txt".to_string());
    let file_appender = tracing_appender::rolling::never(dir, filename);
    tracing_appender::non_blocking(file_appender)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
