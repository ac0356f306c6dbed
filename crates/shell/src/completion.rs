// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The completion engine: given a partial command line and the byte
//! range of the token under the cursor, determines which of the four
//! grammar productions that token belongs to and dispatches to the
//! matching strategy.

use std::fmt;

use configshell_core::node::{resolve_path, BoundParams, Node};
use configshell_core::Preferences;
use configshell_grammar::{parse, ParsedCommand, Token, TokenKind};

use crate::builtins;

/// One component of a [`Hint`] describing what the cursor is currently
/// completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintToken {
    Path,
    Command,
    Parameter(String),
    FreeParameter,
    Keyword,
}

impl fmt::Display for HintToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintToken::Path => write!(f, "path"),
            HintToken::Command => write!(f, "command"),
            HintToken::Parameter(name) => write!(f, "{name}"),
            HintToken::FreeParameter => write!(f, "free_parameter"),
            HintToken::Keyword => write!(f, "keyword="),
        }
    }
}

/// The short label the REPL renders above the input line describing
/// what the cursor is completing, e.g. `path|command`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hint(pub Vec<HintToken>);

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("|"))
    }
}

/// Given the full line buffer and the `[begin, end)` byte range of the
/// token under the cursor, return completion candidates and the hint
/// label describing them.
///
/// `current` is the node used as the root of relative path resolution
/// at the prompt, matching the REPL's notion of "current node".
pub fn complete(current: &Node, prefs: &Preferences, buffer: &str, begin: usize, end: usize) -> (Vec<String>, Hint) {
    if begin == end {
        let mut synthetic = String::with_capacity(buffer.len() + 1);
        synthetic.push_str(&buffer[..begin]);
        synthetic.push('x');
        synthetic.push_str(&buffer[begin..]);
        let parsed = parse(&synthetic);
        let Some(token) = parsed.token_at(begin, begin + 1).cloned() else {
            return (Vec::new(), Hint::default());
        };
        return dispatch_strategy(current, prefs, &parsed, &synthetic, &token, "");
    }

    let parsed = parse(buffer);
    let Some(token) = parsed.token_at(begin, end).cloned() else {
        return (Vec::new(), Hint::default());
    };
    let prefix = token.text(buffer);
    dispatch_strategy(current, prefs, &parsed, buffer, &token, prefix)
}

fn dispatch_strategy(
    current: &Node,
    prefs: &Preferences,
    parsed: &ParsedCommand,
    source: &str,
    cursor: &Token,
    prefix: &str,
) -> (Vec<String>, Hint) {
    match cursor.kind {
        TokenKind::Command => command_strategy(current, prefs, parsed, source, prefix),
        TokenKind::Path => path_strategy(current, prefs, prefix),
        TokenKind::PParam => pparam_strategy(current, prefs, parsed, source, cursor, prefix),
        TokenKind::KParam { .. } => kparam_strategy(current, prefs, parsed, source, cursor, prefix),
    }
}

/// The node commands/parameters resolve against: the path already typed
/// on the line (if any), resolved from `current`; or `current` itself
/// when no path precedes the token being completed.
fn resolve_target(current: &Node, parsed: &ParsedCommand, source: &str, prefs: &Preferences) -> Node {
    match parsed.path_text(source) {
        Some(raw) => resolve_path(current, raw, prefs).map(|(n, _)| n).unwrap_or_else(|_| current.clone()),
        None => current.clone(),
    }
}

fn command_strategy(current: &Node, prefs: &Preferences, parsed: &ParsedCommand, source: &str, prefix: &str) -> (Vec<String>, Hint) {
    let target = resolve_target(current, parsed, source, prefs);
    let mut candidates = Vec::new();

    let mut names: Vec<String> = builtins::builtin_specs().into_iter().map(|s| s.name).collect();
    names.extend(target.commands().into_iter().map(|s| s.name));
    for name in names {
        if name.starts_with(prefix) {
            candidates.push(name);
        }
    }

    if parsed.path.is_none() {
        let children = target.children();
        for child in &children {
            let name = child.name();
            if name.starts_with(prefix) {
                candidates.push(format!("{name}/"));
            }
        }
        if "/".starts_with(prefix) {
            candidates.push("/".to_string());
        }
        if "*".starts_with(prefix) && children.len() > 1 {
            candidates.push("* ".to_string());
        }
        let bookmark_query = prefix.strip_prefix('@').unwrap_or(prefix);
        for name in prefs.bookmarks().keys() {
            if name.starts_with(bookmark_query) {
                candidates.push(format!("@{name}"));
            }
        }
    }

    if candidates.len() == 1 {
        let only = candidates[0].clone();
        if !only.ends_with('/') && !only.ends_with(' ') {
            candidates[0] = format!("{only} ");
        }
    }

    (candidates, Hint(vec![HintToken::Path, HintToken::Command]))
}

fn path_strategy(current: &Node, prefs: &Preferences, prefix: &str) -> (Vec<String>, Hint) {
    let (basedir, partial) = match prefix.rfind('/') {
        Some(i) => (&prefix[..=i], &prefix[i + 1..]),
        None => ("", prefix),
    };

    let mut candidates = Vec::new();
    if let Ok((base_node, _)) = resolve_path(current, basedir, prefs) {
        let children = base_node.children();
        for child in &children {
            let name = child.name();
            if name.starts_with(partial) {
                let suffix = if child.children().is_empty() { " " } else { "/" };
                candidates.push(format!("{basedir}{name}{suffix}"));
            }
        }
        if (partial.is_empty() || partial == "*") && children.len() > 1 {
            candidates.push(format!("{basedir}* "));
        }
    }

    let bookmark_query = partial.strip_prefix('@').unwrap_or(partial);
    for name in prefs.bookmarks().keys() {
        if name.starts_with(bookmark_query) {
            candidates.push(format!("@{name}"));
        }
    }

    (candidates, Hint(vec![HintToken::Path]))
}

fn bound_params(parsed: &ParsedCommand, source: &str, cursor: &Token) -> BoundParams {
    let positional = parsed
        .pparams
        .iter()
        .filter(|t| t.span != cursor.span)
        .map(|t| t.text(source).to_string())
        .collect();
    let keyword = parsed
        .kparams_parsed(source)
        .into_iter()
        .filter(|kp| kp.span != cursor.span)
        .map(|kp| (kp.keyword, kp.value))
        .collect();
    BoundParams { positional, keyword }
}

fn pparam_strategy(
    current: &Node,
    prefs: &Preferences,
    parsed: &ParsedCommand,
    source: &str,
    cursor: &Token,
    prefix: &str,
) -> (Vec<String>, Hint) {
    let target = resolve_target(current, parsed, source, prefs);
    let Some(command) = parsed.command_text(source) else {
        return (Vec::new(), Hint::default());
    };
    let Some(spec) = builtins::builtin_specs().into_iter().chain(target.commands()).find(|s| s.name == command) else {
        return (Vec::new(), Hint::default());
    };

    let bound = bound_params(parsed, source, cursor);
    let slot_index = bound.positional.len();
    let mut candidates = Vec::new();
    let mut hint = Vec::new();

    if slot_index < spec.params.len() {
        let param = &spec.params[slot_index];
        let already_keyword_filled = bound.keyword.iter().any(|(k, _)| k == &param.name);
        if !already_keyword_filled {
            candidates.extend(target.complete_param(command, &bound, prefix, &param.name));
            hint.push(HintToken::Parameter(param.name.clone()));
        }
    }

    for (i, param) in spec.params.iter().enumerate() {
        if i < slot_index {
            continue;
        }
        if bound.keyword.iter().any(|(k, _)| k == &param.name) {
            continue;
        }
        let entry = format!("{}=", param.name);
        if entry.starts_with(prefix) {
            candidates.push(entry);
        }
    }
    if !spec.params.is_empty() {
        hint.push(HintToken::Keyword);
    }

    if spec.variadic_positional || spec.variadic_keyword {
        candidates.extend(target.complete_param(command, &bound, prefix, "*"));
        hint.push(HintToken::FreeParameter);
    }

    (candidates, Hint(hint))
}

fn kparam_strategy(
    current: &Node,
    prefs: &Preferences,
    parsed: &ParsedCommand,
    source: &str,
    cursor: &Token,
    text: &str,
) -> (Vec<String>, Hint) {
    let target = resolve_target(current, parsed, source, prefs);
    let Some(command) = parsed.command_text(source) else {
        return (Vec::new(), Hint(vec![HintToken::Keyword]));
    };

    let eq = text.find('=').unwrap_or(text.len());
    let keyword = &text[..eq];
    let value = text.get(eq + 1..).unwrap_or("");
    let bound = bound_params(parsed, source, cursor);

    let candidates = target
        .complete_param(command, &bound, value, keyword)
        .into_iter()
        .map(|candidate| format!("{keyword}={candidate}"))
        .collect();

    (candidates, Hint(vec![HintToken::Keyword]))
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
