// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide shared preferences store.
//!
//! A [`Preferences`] value is created once and handed to every component
//! that needs it by reference, giving a single "one store, visible to
//! all" instance per process while keeping tests isolated from each
//! other.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigShellError;

/// Where a [`Preferences`] store reads and writes its values. Letting a
/// host application swap this out is what makes the store's on-disk
/// format implementation-defined rather than a hard JSON-file
/// requirement; [`JsonFileBackend`] is the default used when none is
/// supplied.
pub trait PreferencesBackend {
    /// Read the values at `path`. A missing file is not an error: return
    /// an empty map so the caller falls back to its built-in defaults.
    fn load(&self, path: &Path) -> Result<HashMap<String, PrefValue>, ConfigShellError>;

    /// Persist `values` to `path`.
    fn save(&self, path: &Path, values: &HashMap<String, PrefValue>) -> Result<(), ConfigShellError>;
}

impl fmt::Debug for dyn PreferencesBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn PreferencesBackend")
    }
}

/// Default [`PreferencesBackend`]: JSON via `serde_json`, written with a
/// write-then-rename discipline so a crash mid-save cannot leave a
/// truncated file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileBackend;

impl PreferencesBackend for JsonFileBackend {
    fn load(&self, path: &Path) -> Result<HashMap<String, PrefValue>, ConfigShellError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, path: &Path, values: &HashMap<String, PrefValue>) -> Result<(), ConfigShellError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(values)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

/// A preference value. Covers every shape the preferences file must
/// round-trip: booleans, integers, strings, ordered string lists, and
/// string-to-string maps (used for `bookmarks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Direction for a `<`/`>` history step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Back,
    Forward,
}

/// The process-wide preferences store.
#[derive(Debug)]
pub struct Preferences {
    values: HashMap<String, PrefValue>,
    autosave: bool,
    path: Option<PathBuf>,
    backend: Box<dyn PreferencesBackend>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Preferences {
    /// Build a store seeded with the default values a fresh shell starts
    /// with: colors on, tree bullets square (`+`), the root node shown,
    /// no depth limit, one completion column per screenful, empty
    /// bookmarks and history.
    pub fn with_defaults() -> Self {
        let mut values = HashMap::new();
        values.insert("color_mode".to_string(), PrefValue::Bool(true));
        values.insert(
            "color_default".to_string(),
            PrefValue::Str("default".to_string()),
        );
        values.insert("color_path".to_string(), PrefValue::Str("blue".to_string()));
        values.insert(
            "color_command".to_string(),
            PrefValue::Str("cyan".to_string()),
        );
        values.insert(
            "color_parameter".to_string(),
            PrefValue::Str("magenta".to_string()),
        );
        values.insert(
            "color_keyword".to_string(),
            PrefValue::Str("magenta".to_string()),
        );
        values.insert("completions_in_columns".to_string(), PrefValue::Bool(true));
        values.insert("tree_round_nodes".to_string(), PrefValue::Bool(false));
        values.insert("tree_status_mode".to_string(), PrefValue::Bool(true));
        values.insert("tree_show_root".to_string(), PrefValue::Bool(true));
        values.insert("tree_max_depth".to_string(), PrefValue::Int(0));
        values.insert("prompt_length".to_string(), PrefValue::Int(30));
        values.insert(
            "loglevel_console".to_string(),
            PrefValue::Str("info".to_string()),
        );
        values.insert(
            "loglevel_file".to_string(),
            PrefValue::Str("debug".to_string()),
        );
        values.insert("logfile".to_string(), PrefValue::Str(String::new()));
        values.insert("bookmarks".to_string(), PrefValue::Map(BTreeMap::new()));
        values.insert("path_history".to_string(), PrefValue::List(Vec::new()));
        values.insert("path_history_index".to_string(), PrefValue::Int(0));

        Self {
            values,
            autosave: false,
            path: None,
            backend: Box::new(JsonFileBackend),
        }
    }

    /// Load from `path` if it exists; a missing file is not an error and
    /// yields the default store with `path`/`autosave` set so subsequent
    /// writes persist. Uses [`JsonFileBackend`]; use [`Self::load_with_backend`]
    /// to supply a different one.
    pub fn load(path: impl AsRef<Path>, autosave: bool) -> Result<Self, ConfigShellError> {
        Self::load_with_backend(path, autosave, Box::new(JsonFileBackend))
    }

    /// Load from `path` via a caller-supplied [`PreferencesBackend`]
    /// rather than the default JSON file.
    pub fn load_with_backend(
        path: impl AsRef<Path>,
        autosave: bool,
        backend: Box<dyn PreferencesBackend>,
    ) -> Result<Self, ConfigShellError> {
        let path = path.as_ref();
        let mut prefs = Self::with_defaults();
        prefs.autosave = autosave;
        prefs.path = Some(path.to_path_buf());
        prefs.values.extend(backend.load(path)?);
        prefs.backend = backend;
        Ok(prefs)
    }

    /// Persist the store to its configured path through its
    /// [`PreferencesBackend`].
    pub fn save(&self) -> Result<(), ConfigShellError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        self.backend.save(path, &self.values)
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn set_autosave(&mut self, autosave: bool) {
        self.autosave = autosave;
    }

    /// Readers never see an error for an unknown key: this returns `None`.
    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        self.values.get(key)
    }

    /// Write `key`, persisting immediately when autosave is enabled.
    pub fn set(&mut self, key: impl Into<String>, value: PrefValue) -> Result<(), ConfigShellError> {
        self.values.insert(key.into(), value);
        if self.autosave {
            self.save()?;
        }
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<(), ConfigShellError> {
        self.values.remove(key);
        if self.autosave {
            self.save()?;
        }
        Ok(())
    }

    pub fn bookmarks(&self) -> BTreeMap<String, String> {
        self.get("bookmarks")
            .and_then(PrefValue::as_map)
            .cloned()
            .unwrap_or_default()
    }

    pub fn bookmark_add(&mut self, name: &str, path: &str) -> Result<(), ConfigShellError> {
        let mut bookmarks = self.bookmarks();
        bookmarks.insert(name.to_string(), path.to_string());
        self.set("bookmarks", PrefValue::Map(bookmarks))
    }

    pub fn bookmark_del(&mut self, name: &str) -> Result<bool, ConfigShellError> {
        let mut bookmarks = self.bookmarks();
        let existed = bookmarks.remove(name).is_some();
        if existed {
            self.set("bookmarks", PrefValue::Map(bookmarks))?;
        }
        Ok(existed)
    }

    pub fn path_history(&self) -> Vec<String> {
        self.get("path_history")
            .and_then(PrefValue::as_list)
            .map(|l| l.to_vec())
            .unwrap_or_default()
    }

    pub fn path_history_index(&self) -> usize {
        self.get("path_history_index")
            .and_then(PrefValue::as_int)
            .map(|n| n.max(0) as usize)
            .unwrap_or(0)
    }

    /// Record a navigation to `path`. Truncates history after the current
    /// index, appends `path`, and advances the index — unless `path` is
    /// already the entry at the current index, matching `cd` to the
    /// node you're already on.
    pub fn record_path(&mut self, path: &str) -> Result<(), ConfigShellError> {
        let mut history = self.path_history();
        let index = self.path_history_index();

        if history.get(index).map(String::as_str) == Some(path) {
            return Ok(());
        }

        history.truncate((index + 1).min(history.len()));
        history.push(path.to_string());
        let new_index = history.len() - 1;

        self.set("path_history", PrefValue::List(history))?;
        self.set("path_history_index", PrefValue::Int(new_index as i64))
    }

    /// Step `<`/`>` history to the nearest still-resolvable entry.
    /// Returns `None` (leaving the index untouched) when no resolvable
    /// entry exists in the requested direction.
    pub fn history_step(
        &mut self,
        direction: HistoryDirection,
        resolvable: impl Fn(&str) -> bool,
    ) -> Result<Option<String>, ConfigShellError> {
        let history = self.path_history();
        if history.is_empty() {
            return Ok(None);
        }
        let current = self.path_history_index().min(history.len() - 1);

        let mut candidate = current;
        loop {
            let next = match direction {
                HistoryDirection::Back => candidate.checked_sub(1),
                HistoryDirection::Forward => {
                    let n = candidate + 1;
                    (n < history.len()).then_some(n)
                }
            };
            let Some(next) = next else {
                return Ok(None);
            };
            candidate = next;
            if resolvable(&history[candidate]) {
                self.set("path_history_index", PrefValue::Int(candidate as i64))?;
                return Ok(Some(history[candidate].clone()));
            }
        }
    }
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
