// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! configshell: the interactive shell built on `configshell-core` and
//! `configshell-grammar` — built-in commands, completion, dispatch, the
//! REPL loop, and the collaborator interfaces a host application wires
//! its own terminal, picker, and console renderer into.

pub mod builtins;
pub mod collab;
pub mod completion;
pub mod dispatch;
pub mod env;
pub mod logging;
pub mod repl;

pub use collab::Collaborators;
pub use completion::{Hint, HintToken};
pub use dispatch::{dispatch, DispatchOutput};
pub use env::{resolve_paths, PrefPaths};
pub use repl::Repl;
