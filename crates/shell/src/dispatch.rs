// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command dispatcher: resolves the parsed path and command against
//! the current node, marshals parameters, invokes the command (once per
//! child when the path carries the iterator wildcard), and interprets
//! the result.

use configshell_core::node::{resolve_path, CommandArgs, CommandOutcome, Node};
use configshell_core::{ConfigShellError, Preferences};

use crate::builtins::{invoke_builtin, is_builtin};
use crate::collab::Collaborators;

/// Output of one dispatched command line: the text it printed, and how
/// it wants the REPL to update its state.
#[derive(Debug)]
pub struct DispatchOutput {
    pub lines: Vec<String>,
    pub outcome: CommandOutcome,
}

/// Run `(path, command, pparams, kparams)` against `current`: resolve the
/// path and command, marshal parameters, invoke (fanning out across
/// children when the iterator wildcard is set), and interpret the result.
pub fn dispatch(
    current: &Node,
    parsed: &configshell_grammar::ParsedCommand,
    source: &str,
    prefs: &mut Preferences,
    collab: &Collaborators,
) -> Result<DispatchOutput, ConfigShellError> {
    let raw_path = parsed.path_text(source).unwrap_or("");
    let (target, iter_all) = resolve_path(current, raw_path, prefs)?;

    let command_name = match parsed.command_text(source) {
        Some(name) => name.to_string(),
        None if iter_all => "ls".to_string(),
        None => "cd".to_string(),
    };

    let mut positional: Vec<String> = parsed.pparam_texts(source).into_iter().map(str::to_string).collect();
    if parsed.command.is_none() && !iter_all {
        positional = vec![".".to_string()];
    }
    let keyword: Vec<(String, String)> = parsed
        .kparams_parsed(source)
        .into_iter()
        .map(|kp| (kp.keyword, kp.value))
        .collect();
    let args = CommandArgs { positional, keyword };

    let targets: Vec<Node> = if iter_all { target.children() } else { vec![target.clone()] };

    let mut lines = Vec::new();
    let mut outcome = CommandOutcome::None;

    for exec_target in &targets {
        if iter_all {
            lines.push(exec_target.path());
        }

        let (this_outcome, this_lines) = if is_builtin(&command_name) {
            invoke_builtin(&command_name, exec_target, &args, prefs, collab)?
        } else {
            let outcome = exec_target.execute_command(&command_name, &args)?;
            (outcome, Vec::new())
        };
        lines.extend(this_lines);

        match this_outcome {
            CommandOutcome::Exit => return Ok(DispatchOutput { lines, outcome: CommandOutcome::Exit }),
            CommandOutcome::Navigate(node) => outcome = CommandOutcome::Navigate(node),
            CommandOutcome::None => {}
        }
    }

    Ok(DispatchOutput { lines, outcome })
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
