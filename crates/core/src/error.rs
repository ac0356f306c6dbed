// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type shared by the node tree, preferences store, and everything
//! built on top of them.

use thiserror::Error;

/// The error family a command-line session can surface to its user.
///
/// Every variant maps to one of the failure modes enumerated for command
/// execution: an unresolved path, an unknown bookmark, a missing command,
/// a parameter-arity mismatch, a value that fails `UiType::parse`, a
/// command body that fails on its own terms, or I/O underneath the
/// preferences/history files.
#[derive(Debug, Error)]
pub enum ConfigShellError {
    #[error("no such path: {path}")]
    BadPath { path: String },

    #[error("no such bookmark: {name}")]
    BadBookmark { name: String },

    #[error("no such command: {command}")]
    CommandNotFound { command: String },

    #[error("bad usage for '{command}': {message}")]
    BadUsage { command: String, message: String },

    #[error("bad value for '{parameter}': {message}")]
    BadValue { parameter: String, message: String },

    #[error("'{command}' failed: {message}")]
    ExecutionError { command: String, message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl ConfigShellError {
    pub fn bad_path(path: impl Into<String>) -> Self {
        Self::BadPath { path: path.into() }
    }

    pub fn bad_bookmark(name: impl Into<String>) -> Self {
        Self::BadBookmark { name: name.into() }
    }

    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    pub fn bad_usage(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadUsage {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn bad_value(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadValue {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn execution_error(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionError {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Short category name, used by the REPL boundary to pick an exit code
    /// and by `tracing` spans to tag the failure without formatting the
    /// full message twice.
    pub fn category(&self) -> &'static str {
        match self {
            Self::BadPath { .. } => "bad_path",
            Self::BadBookmark { .. } => "bad_bookmark",
            Self::CommandNotFound { .. } => "command_not_found",
            Self::BadUsage { .. } => "bad_usage",
            Self::BadValue { .. } => "bad_value",
            Self::ExecutionError { .. } => "execution_error",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for ConfigShellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigShellError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
