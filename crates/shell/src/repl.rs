// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The REPL loop: reads lines, maintains the current node, formats the
//! prompt, drives completion, dispatches commands, and persists history.

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor};
use rustyline_derive::Helper;

use configshell_core::node::{CommandOutcome, Node};
use configshell_core::prefs::PrefValue;
use configshell_core::{ConfigShellError, Preferences};
use configshell_grammar::{parse, COMPLETION_WORD_DELIMS};

use crate::collab::Collaborators;
use crate::completion::{self, Hint};
use crate::dispatch;

/// Format `{optional node-supplied prefix}{path}> `, eliding the path to
/// `head...tail` when `prompt_length` is positive and shorter than the
/// path.
pub fn format_prompt(node: &Node, prefs: &Preferences) -> String {
    let path = node.path();
    let prefix = node.prompt_message().unwrap_or_default();
    let prompt_length = prefs.get("prompt_length").and_then(PrefValue::as_int).unwrap_or(0);

    let shown = if prompt_length > 0 && (prompt_length as usize) < path.chars().count() {
        elide(&path, prompt_length as usize)
    } else {
        path
    };
    format!("{prefix}{shown}> ")
}

fn elide(path: &str, total_len: usize) -> String {
    const ELLIPSIS: &str = "...";
    if total_len <= ELLIPSIS.len() {
        return ELLIPSIS.chars().take(total_len).collect();
    }
    let remaining = total_len - ELLIPSIS.len();
    let head_len = remaining / 2;
    let tail_len = remaining - head_len;
    let chars: Vec<char> = path.chars().collect();
    let head: String = chars.iter().take(head_len).collect();
    let tail: String = chars.iter().skip(chars.len().saturating_sub(tail_len)).collect();
    format!("{head}{ELLIPSIS}{tail}")
}

/// The completion-hint line printed above the prompt on each completion
/// event: dots padded to the cursor column, followed by the hint text.
pub fn completion_hint_line(cursor_col: usize, hint: &Hint) -> String {
    format!("{}{hint}", ".".repeat(cursor_col))
}

/// Lay out completion candidates in columns, per the resolved open
/// question: at most one column per `max_length + 2` columns of
/// terminal width, remainder by wrap.
pub fn layout_columns(candidates: &[String], width: usize) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    let max_length = candidates.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let col_width = max_length + 2;
    let columns = (width / col_width).max(1);

    let mut out = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        if i > 0 && i % columns == 0 {
            out.push('\n');
        }
        out.push_str(&format!("{candidate:<col_width$}"));
    }
    out
}

#[derive(Helper)]
struct ShellHelper {
    current: Rc<RefCell<Node>>,
    prefs: Rc<RefCell<Preferences>>,
    last_hint: Rc<RefCell<Hint>>,
}

impl rustyline::hint::Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let buffer = &line[..pos];
        let begin = buffer
            .rfind(|ch: char| COMPLETION_WORD_DELIMS.contains(ch))
            .map(|i| i + 1)
            .unwrap_or(0);

        let current = self.current.borrow().clone();
        let prefs = self.prefs.borrow();
        let (candidates, hint) = completion::complete(&current, &prefs, buffer, begin, pos);
        println!("\n{}", completion_hint_line(pos, &hint));
        *self.last_hint.borrow_mut() = hint;

        let pairs = candidates
            .into_iter()
            .map(|c| Pair { display: c.clone(), replacement: c })
            .collect();
        Ok((begin, pairs))
    }
}

/// Drives a [`Node`] tree as an interactive shell: reads lines, runs
/// them through the grammar and dispatcher, and reacts to the
/// dispatcher's interpreted outcome.
pub struct Repl {
    current: Rc<RefCell<Node>>,
    prefs: Rc<RefCell<Preferences>>,
    collab: Collaborators,
    last_hint: Rc<RefCell<Hint>>,
    history_path: Option<PathBuf>,
}

impl Repl {
    pub fn new(root: Node, prefs: Preferences) -> Self {
        Self {
            current: Rc::new(RefCell::new(root)),
            prefs: Rc::new(RefCell::new(prefs)),
            collab: Collaborators::default(),
            last_hint: Rc::new(RefCell::new(Hint::default())),
            history_path: None,
        }
    }

    pub fn with_collaborators(mut self, collab: Collaborators) -> Self {
        self.collab = collab;
        self
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    pub fn current_node(&self) -> Node {
        self.current.borrow().clone()
    }

    /// The hint label from the most recent completion event.
    pub fn last_completion_hint(&self) -> Hint {
        self.last_hint.borrow().clone()
    }

    /// Run one line to completion: print its output, apply the
    /// dispatcher's interpreted outcome. Returns `true` if the line
    /// requested shell exit.
    fn execute_line(&mut self, line: &str) -> Result<bool, ConfigShellError> {
        let parsed = parse(line);
        if parsed.tokens.is_empty() {
            return Ok(false);
        }

        let current = self.current.borrow().clone();
        let output = {
            let mut prefs = self.prefs.borrow_mut();
            dispatch::dispatch(&current, &parsed, line, &mut prefs, &self.collab)?
        };

        for rendered in &output.lines {
            println!("{rendered}");
        }

        match output.outcome {
            CommandOutcome::Navigate(node) => {
                *self.current.borrow_mut() = node;
                Ok(false)
            }
            CommandOutcome::Exit => Ok(true),
            CommandOutcome::None => Ok(false),
        }
    }

    /// Run the interactive read-eval-print loop against a real
    /// terminal. Ctrl-C aborts the pending line and restarts the loop
    /// at the same current node; Ctrl-D (EOF) exits cleanly.
    pub fn run_interactive(&mut self) -> Result<(), ConfigShellError> {
        let config = Config::builder()
            .auto_add_history(true)
            .history_ignore_space(true)
            .history_ignore_dups(true)
            .build();

        let mut rl: Editor<ShellHelper, DefaultHistory> =
            Editor::with_config(config).map_err(|err| ConfigShellError::Io { message: err.to_string() })?;
        rl.set_helper(Some(ShellHelper {
            current: self.current.clone(),
            prefs: self.prefs.clone(),
            last_hint: self.last_hint.clone(),
        }));

        if let Some(path) = &self.history_path {
            let _ = rl.load_history(path);
        }

        loop {
            let prompt = format_prompt(&self.current.borrow(), &self.prefs.borrow());
            match rl.readline(&prompt) {
                Ok(line) => {
                    match self.execute_line(&line) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => {
                            tracing::error!(category = err.category(), error = %err, "command failed");
                            println!("{err}");
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(ConfigShellError::Io { message: err.to_string() }),
            }
        }

        if let Some(path) = &self.history_path {
            let _ = rl.save_history(path);
        }
        Ok(())
    }

    /// Run every line of `path` in sequence, starting at the current
    /// node. `exit_on_error` controls whether a failed line stops the
    /// script or is logged and skipped.
    pub fn run_script(&mut self, path: &Path, exit_on_error: bool) -> Result<(), ConfigShellError> {
        let contents = std::fs::read_to_string(path)?;
        self.run_lines(contents.lines().map(str::to_string), exit_on_error)
    }

    /// Run every line read from stdin in sequence, as [`Repl::run_script`].
    pub fn run_stdin(&mut self, exit_on_error: bool) -> Result<(), ConfigShellError> {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            lines.push(line?);
        }
        self.run_lines(lines.into_iter(), exit_on_error)
    }

    fn run_lines(&mut self, lines: impl Iterator<Item = String>, exit_on_error: bool) -> Result<(), ConfigShellError> {
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            match self.execute_line(&line) {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(category = err.category(), error = %err, "command failed");
                    eprintln!("{err}");
                    if exit_on_error {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "repl_tests.rs"]
mod tests;
