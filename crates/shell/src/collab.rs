// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External collaborators: the interfaces the framework depends on but
//! does not own the implementation of — the ANSI text renderer, raw
//! terminal-size/cursor I/O, and the interactive `cd` list picker.
//! Default implementations are provided so the workspace is runnable
//! end-to-end; a host application may swap any of them out.

use std::io::IsTerminal;

use configshell_core::node::{Health, TaggedText};
use dialoguer::FuzzySelect;

/// Re-exported so every external collaborator this workspace names
/// (`ConsoleRenderer`, `TerminalInfo`, `ListPicker`, `PreferencesBackend`)
/// is reachable from one module. The trait itself lives in
/// `configshell_core::prefs` since that's where `Preferences` lives and
/// `core` cannot depend back on this crate.
pub use configshell_core::{JsonFileBackend, PreferencesBackend};

/// Renders the minimal tagged-text model and colors the three token
/// roles the prompt and completion hint line use.
pub trait ConsoleRenderer {
    fn render_doc(&self, blocks: &[TaggedText]) -> String;
    fn paint_path(&self, text: &str) -> String;
    fn paint_command(&self, text: &str) -> String;
    fn paint_parameter(&self, text: &str) -> String;
    fn paint_keyword(&self, text: &str) -> String;
    fn paint_status(&self, text: &str, health: Health) -> String;
}

/// Raw terminal size and cursor position queries.
pub trait TerminalInfo {
    fn width(&self) -> usize;
    fn cursor_xy(&self) -> Option<(u16, u16)>;
}

/// Full-screen list selection used by the bare `cd` built-in.
pub trait ListPicker {
    /// Returns the selected index, or `None` if the user cancelled.
    fn pick(&self, lines: &[String], initial_index: usize) -> Option<usize>;
}

mod codes {
    pub const PATH: &str = "34";
    pub const COMMAND: &str = "36";
    pub const PARAMETER: &str = "35";
    pub const KEYWORD: &str = "35";
    pub const HEALTHY: &str = "32";
    pub const UNHEALTHY: &str = "1;31";
}

fn paint(code: &str, text: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

/// Whether ANSI escapes should be emitted: respects `NO_COLOR`/`COLOR`
/// and falls back to an `IsTerminal` check on stdout.
pub fn should_colorize() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(v) = std::env::var("COLOR") {
        if v == "0" {
            return false;
        }
        if v == "1" {
            return true;
        }
    }
    std::io::stdout().is_terminal()
}

/// Default [`ConsoleRenderer`]: 256-color-safe ANSI escapes, falling
/// back to plain text when [`should_colorize`] says not to.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiConsole {
    pub colorize: bool,
}

impl AnsiConsole {
    pub fn new() -> Self {
        Self {
            colorize: should_colorize(),
        }
    }

    fn maybe_paint(&self, code: &str, text: &str) -> String {
        if self.colorize {
            paint(code, text)
        } else {
            text.to_string()
        }
    }
}

impl ConsoleRenderer for AnsiConsole {
    fn render_doc(&self, blocks: &[TaggedText]) -> String {
        let mut out = String::new();
        for block in blocks {
            let line = match block {
                TaggedText::Paragraph(s) => s.clone(),
                TaggedText::Bold(s) => self.maybe_paint("1", s),
                TaggedText::Italic(s) => self.maybe_paint("3", s),
                TaggedText::Code(s) => self.maybe_paint("2", s),
                TaggedText::LiteralBlock(s) => s.lines().map(|l| format!("    {l}")).collect::<Vec<_>>().join("\n"),
                TaggedText::Heading(s) => format!("{}\n{}", self.maybe_paint("1", s), "-".repeat(s.len())),
                TaggedText::ListItem(s) => format!("  - {s}"),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn paint_path(&self, text: &str) -> String {
        self.maybe_paint(codes::PATH, text)
    }

    fn paint_command(&self, text: &str) -> String {
        self.maybe_paint(codes::COMMAND, text)
    }

    fn paint_parameter(&self, text: &str) -> String {
        self.maybe_paint(codes::PARAMETER, text)
    }

    fn paint_keyword(&self, text: &str) -> String {
        self.maybe_paint(codes::KEYWORD, text)
    }

    fn paint_status(&self, text: &str, health: Health) -> String {
        match health {
            Health::Ok => self.maybe_paint(codes::HEALTHY, text),
            Health::Error => self.maybe_paint(codes::UNHEALTHY, text),
            Health::Unknown => text.to_string(),
        }
    }
}

/// Default [`TerminalInfo`]: width from `terminal_size`, falling back
/// to a 132-column cap when not attached to a tty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTerminal;

impl TerminalInfo for RealTerminal {
    fn width(&self) -> usize {
        terminal_size::terminal_size()
            .map(|(terminal_size::Width(w), _)| w as usize)
            .unwrap_or(132)
            .min(132)
    }

    fn cursor_xy(&self) -> Option<(u16, u16)> {
        None
    }
}

/// Default [`ListPicker`]: a fuzzy-searchable selection prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPicker;

impl ListPicker for DialoguerPicker {
    fn pick(&self, lines: &[String], initial_index: usize) -> Option<usize> {
        if lines.is_empty() {
            return None;
        }
        FuzzySelect::new()
            .items(lines)
            .default(initial_index.min(lines.len().saturating_sub(1)))
            .interact_opt()
            .ok()
            .flatten()
    }
}

/// The bundle of collaborators a [`crate::repl::Repl`] needs.
pub struct Collaborators {
    pub console: Box<dyn ConsoleRenderer>,
    pub terminal: Box<dyn TerminalInfo>,
    pub picker: Box<dyn ListPicker>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            console: Box::new(AnsiConsole::new()),
            terminal: Box::new(RealTerminal),
            picker: Box::new(DialoguerPicker),
        }
    }
}

#[cfg(test)]
#[path = "collab_tests.rs"]
mod tests;
