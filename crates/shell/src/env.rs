// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the shell crate: where
//! preferences, history, and logs live on disk absent an explicit
//! override from the embedding application.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Resolve the preferences directory: `CONFIGSHELL_PREFS_DIR` >
/// `dirs::state_dir()` > `~/.local/state` > `/tmp`, joined with
/// `configshell`.
pub fn prefs_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CONFIGSHELL_PREFS_DIR") {
        return PathBuf::from(dir);
    }
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("configshell")
}

/// Override for the readline history file, bypassing [`prefs_dir`]
/// entirely when set.
pub fn history_file_override() -> Option<PathBuf> {
    std::env::var("CONFIGSHELL_HISTORY_FILE").ok().map(PathBuf::from)
}

/// Override for the log file, bypassing [`prefs_dir`] entirely when set.
pub fn logfile_override() -> Option<PathBuf> {
    std::env::var("CONFIGSHELL_LOG_FILE").ok().map(PathBuf::from)
}

/// The resolved set of paths a `configshell` host needs to wire up
/// persistence: the preferences store, the readline history, and the
/// default log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefPaths {
    pub prefs_file: PathBuf,
    pub history_file: PathBuf,
    pub default_logfile: PathBuf,
}

/// Resolve every path a host needs, creating the preferences directory
/// if it doesn't exist yet. The preferences file keeps the name
/// `prefs.bin` despite holding JSON content — only its on-disk format
/// is implementation-defined, not its name.
pub fn resolve_paths() -> io::Result<PrefPaths> {
    let dir = prefs_dir();
    fs::create_dir_all(&dir)?;

    Ok(PrefPaths {
        prefs_file: dir.join("prefs.bin"),
        history_file: history_file_override().unwrap_or_else(|| dir.join("history.txt")),
        default_logfile: logfile_override().unwrap_or_else(|| dir.join("log.txt")),
    })
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
