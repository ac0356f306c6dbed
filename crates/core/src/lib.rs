// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! configshell-core: node tree, preferences store, and ui-type helpers
//! shared by the grammar and shell crates.

pub mod error;
pub mod node;
pub mod prefs;
pub mod ui_type;

pub use error::ConfigShellError;
pub use node::{Node, NodeOps};
pub use prefs::{JsonFileBackend, PrefValue, Preferences, PreferencesBackend};
pub use ui_type::{
    BoolType, ColorDefaultType, ColorType, LoglevelType, NumberType, StringType, UiType,
};
