// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The built-in commands every node accepts regardless of what its
//! [`NodeOps`] declares: `cd`, `ls`, `pwd`, `help`, `set`, `get`,
//! `bookmarks`, `exit`. These live at the shell layer rather than on
//! [`NodeOps`] because they need the preferences store and the
//! interactive collaborators, neither of which a node implementation
//! owns.

use configshell_core::node::{
    resolve_path, render_tree, render_tree_list, CommandArgs, CommandOutcome, CommandSpec,
    GroupSpec, Node, ParamSpec, TaggedText,
};
use configshell_core::prefs::HistoryDirection;
use configshell_core::{ConfigShellError, Preferences};

use crate::collab::Collaborators;

/// Names reserved for built-ins; a node declaring a command under one of
/// these names would never be reachable, so node command tables should
/// avoid them.
pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "pwd" | "cd" | "ls" | "help" | "set" | "get" | "bookmarks" | "exit"
    )
}

pub fn builtin_specs() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("pwd", "Display the current working path."),
        CommandSpec::new(
            "cd",
            "Navigate to a path; '<'/'>'' step through history; no argument opens a picker.",
        )
        .with_param(ParamSpec::optional("path", ".")),
        CommandSpec::new("ls", "List the children of a path as a tree.")
            .with_param(ParamSpec::optional("path", "."))
            .with_param(ParamSpec::optional("depth", "unlimited")),
        CommandSpec::new("help", "Show the command list, or detailed help for one command.")
            .with_param(ParamSpec::optional("command", "")),
        CommandSpec::new("set", "Set one or more configuration parameters.")
            .with_param(ParamSpec::optional("group", ""))
            .variadic_keyword(),
        CommandSpec::new("get", "Display one or more configuration parameters.")
            .with_param(ParamSpec::optional("group", ""))
            .variadic_positional(),
        CommandSpec::new("bookmarks", "Manage saved path bookmarks: add, del, go, show.")
            .with_param(ParamSpec::required("action"))
            .with_param(ParamSpec::optional("name", "")),
        CommandSpec::new("exit", "Leave the shell."),
    ]
}

pub fn invoke_builtin(
    command: &str,
    target: &Node,
    args: &CommandArgs,
    prefs: &mut Preferences,
    collab: &Collaborators,
) -> Result<(CommandOutcome, Vec<String>), ConfigShellError> {
    match command {
        "pwd" => Ok((CommandOutcome::None, vec![target.path()])),
        "cd" => cd(target, args, prefs, collab),
        "ls" => ls(target, args, prefs, collab),
        "help" => Ok((CommandOutcome::None, help(target, args, collab))),
        "set" => set(target, args).map(|out| (CommandOutcome::None, out)),
        "get" => get(target, args).map(|out| (CommandOutcome::None, out)),
        "bookmarks" => bookmarks(target, args, prefs, collab),
        "exit" => Ok((CommandOutcome::Exit, Vec::new())),
        other => Err(ConfigShellError::command_not_found(other)),
    }
}

fn cd(
    target: &Node,
    args: &CommandArgs,
    prefs: &mut Preferences,
    collab: &Collaborators,
) -> Result<(CommandOutcome, Vec<String>), ConfigShellError> {
    let root = target.get_root();
    let requested = args.positional.first().map(String::as_str);
    let is_history_step = matches!(requested, Some("<") | Some(">"));

    let destination = match requested {
        Some("<") => step_history(target, prefs, HistoryDirection::Back)?,
        Some(">") => step_history(target, prefs, HistoryDirection::Forward)?,
        Some(path) => resolve_path(target, path, prefs)?.0,
        None => {
            let width = collab.terminal.width();
            let (lines, paths) = render_tree_list(&root, None, prefs, width);
            let current_index = paths.iter().position(|p| *p == target.path()).unwrap_or(0);
            match collab.picker.pick(&lines, current_index) {
                Some(index) => resolve_path(&root, &paths[index], prefs)?.0,
                None => return Ok((CommandOutcome::None, Vec::new())),
            }
        }
    };

    if !is_history_step {
        prefs.record_path(&destination.path())?;
    }
    Ok((CommandOutcome::Navigate(destination), Vec::new()))
}

fn path_resolves(root: &Node, path: &str) -> bool {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return true;
    }
    let mut current = root.clone();
    for segment in trimmed.split('/') {
        match current.get_child(segment) {
            Some(child) => current = child,
            None => return false,
        }
    }
    true
}

fn step_history(
    target: &Node,
    prefs: &mut Preferences,
    direction: HistoryDirection,
) -> Result<Node, ConfigShellError> {
    let root = target.get_root();
    let stepped = prefs.history_step(direction, |path| path_resolves(&root, path))?;
    match stepped {
        Some(path) => Ok(resolve_path(&root, &path, prefs)?.0),
        None => Ok(target.clone()),
    }
}

fn bookmarks(
    target: &Node,
    args: &CommandArgs,
    prefs: &mut Preferences,
    collab: &Collaborators,
) -> Result<(CommandOutcome, Vec<String>), ConfigShellError> {
    let action = args
        .positional
        .first()
        .ok_or_else(|| ConfigShellError::bad_usage("bookmarks", "expected an action: add, del, go, show"))?
        .as_str();
    let name = args.positional.get(1).map(String::as_str);

    match action {
        "add" => {
            let name = name.ok_or_else(|| {
                ConfigShellError::bad_usage("bookmarks", "'add' requires a bookmark name")
            })?;
            prefs.bookmark_add(name, &target.path())?;
            Ok((CommandOutcome::None, vec![format!("Created bookmark {name}.")]))
        }
        "del" => {
            let name = name.ok_or_else(|| {
                ConfigShellError::bad_usage("bookmarks", "'del' requires a bookmark name")
            })?;
            if prefs.bookmark_del(name)? {
                Ok((CommandOutcome::None, vec![format!("Deleted bookmark {name}.")]))
            } else {
                Err(ConfigShellError::bad_bookmark(name))
            }
        }
        "go" => {
            let name = name.ok_or_else(|| {
                ConfigShellError::bad_usage("bookmarks", "'go' requires a bookmark name")
            })?;
            let (destination, _) = resolve_path(target, &format!("@{name}"), prefs)?;
            prefs.record_path(&destination.path())?;
            Ok((CommandOutcome::Navigate(destination), Vec::new()))
        }
        "show" => {
            let mut doc = vec![TaggedText::Heading("BOOKMARKS".to_string())];
            let bookmarks = prefs.bookmarks();
            if bookmarks.is_empty() {
                doc.push(TaggedText::Paragraph("No bookmarks yet.".to_string()));
            } else {
                for (name, path) in bookmarks {
                    doc.push(TaggedText::Heading(name));
                    doc.push(TaggedText::Paragraph(path));
                }
            }
            let out = collab.console.render_doc(&doc).lines().map(str::to_string).collect();
            Ok((CommandOutcome::None, out))
        }
        other => Err(ConfigShellError::bad_usage(
            "bookmarks",
            format!("unknown action '{other}', expected add, del, go, show"),
        )),
    }
}

fn ls(
    target: &Node,
    args: &CommandArgs,
    prefs: &Preferences,
    collab: &Collaborators,
) -> Result<(CommandOutcome, Vec<String>), ConfigShellError> {
    let path = args.positional.first().map(String::as_str).unwrap_or(".");
    let (listing_root, _) = resolve_path(target, path, prefs)?;

    let depth = match args.positional.get(1) {
        // An explicit 0 means unlimited, same as an absent depth falling
        // back to an unset `tree_max_depth`.
        Some(raw) => {
            let parsed = raw.parse::<usize>().map_err(|_| {
                ConfigShellError::bad_value("depth", format!("'{raw}' is not a non-negative integer"))
            })?;
            (parsed > 0).then_some(parsed)
        }
        None => {
            let configured = prefs
                .get("tree_max_depth")
                .and_then(configshell_core::prefs::PrefValue::as_int)
                .unwrap_or(0);
            (configured > 0).then_some(configured as usize)
        }
    };

    let width = collab.terminal.width();
    let lines = render_tree(&listing_root, depth, prefs, width);
    let out = lines
        .iter()
        .map(|line| {
            format!(
                "{}{}{} [{}]",
                line.prefix,
                line.name,
                line.dotfill,
                collab.console.paint_status(&line.status, line.health)
            )
        })
        .collect();
    Ok((CommandOutcome::None, out))
}

/// `B{command} I{required} [I{optional}] [I{key}...] [I{key}=value...] `
/// style one-line syntax, plus a `key=value ` string of every optional
/// parameter that declares a non-empty default. Built from declared
/// signature data rather than reflection, since [`CommandSpec`] already
/// carries it.
fn command_syntax(spec: &CommandSpec) -> (String, String) {
    let mut syntax = format!("{} ", spec.name);
    for param in spec.params.iter().filter(|p| p.required) {
        syntax.push_str(&format!("{} ", param.name));
    }
    for param in spec.params.iter().filter(|p| !p.required) {
        syntax.push_str(&format!("[{}] ", param.name));
    }
    if spec.variadic_positional {
        syntax.push_str("[key...] ");
    }
    if spec.variadic_keyword {
        syntax.push_str("[key=value...] ");
    }

    let mut defaults = String::new();
    for param in &spec.params {
        if let Some(default) = &param.default {
            if !default.is_empty() {
                defaults.push_str(&format!("{}={default} ", param.name));
            }
        }
    }

    (syntax.trim_end().to_string(), defaults.trim_end().to_string())
}

/// The GENERALITIES/COMMAND SYNTAX intro shown by a bare `help`, ported
/// from `help_intro` (`node.py:42-65`).
fn help_intro() -> Vec<TaggedText> {
    vec![
        TaggedText::Heading("GENERALITIES".to_string()),
        TaggedText::Paragraph(
            "This is an interactive shell in which you can create, delete \
             and configure configuration objects."
                .to_string(),
        ),
        TaggedText::Paragraph(
            "The available commands depend on the work path you are in the \
             objects tree. The prompt that starts each command line \
             indicates your current position, or you can run the pwd \
             command to that effect. Navigating the tree is done using the \
             cd command. Please try 'help cd' for navigation tips."
                .to_string(),
        ),
        TaggedText::Heading("COMMAND SYNTAX".to_string()),
        TaggedText::Paragraph("Commands are built using the following syntax:".to_string()),
        TaggedText::Code("[PATH] COMMAND [OPTIONS]".to_string()),
        TaggedText::Paragraph(
            "PATH indicates the object to run the command on. If omitted, \
             the command runs against your working path."
                .to_string(),
        ),
        TaggedText::Paragraph(
            "OPTIONS depend on the command. Use 'help COMMAND' to get more \
             information."
                .to_string(),
        ),
    ]
}

fn help(target: &Node, args: &CommandArgs, collab: &Collaborators) -> Vec<String> {
    let mut specs = builtin_specs();
    specs.extend(target.commands());

    let Some(command_name) = args.positional.first() else {
        let mut doc = help_intro();
        doc.push(TaggedText::Heading("AVAILABLE COMMANDS".to_string()));
        doc.push(TaggedText::Paragraph(
            "The following commands are available in the work path:".to_string(),
        ));
        for spec in &specs {
            doc.push(TaggedText::ListItem(command_syntax(spec).0));
        }
        return collab.console.render_doc(&doc).lines().map(str::to_string).collect();
    };

    let Some(spec) = specs.into_iter().find(|s| &s.name == command_name) else {
        return vec![format!("Cannot find help topic {command_name}.")];
    };

    let (syntax, defaults) = command_syntax(&spec);
    let mut doc = vec![
        TaggedText::Heading("SYNTAX".to_string()),
        TaggedText::Code(syntax),
    ];
    if !defaults.is_empty() {
        doc.push(TaggedText::Heading("DEFAULT VALUES".to_string()));
        doc.push(TaggedText::Code(defaults));
    }
    doc.push(TaggedText::Heading("DESCRIPTION".to_string()));
    if spec.doc.is_empty() {
        doc.push(TaggedText::Paragraph(spec.summary.clone()));
    } else {
        doc.extend(spec.doc.clone());
    }
    collab.console.render_doc(&doc).lines().map(str::to_string).collect()
}

/// Lists the groups a node declares; shared by `get`/`set` when called
/// with no group argument.
fn list_groups(groups: &[GroupSpec]) -> Vec<String> {
    let mut out = vec!["Available configuration groups:".to_string()];
    out.extend(groups.iter().map(|g| format!("  {}", g.name)));
    out
}

/// Lists every parameter in `group` with its type syntax and
/// description; shared by `get`/`set` when called with a group but no
/// keys.
fn describe_group(group: &GroupSpec) -> Vec<String> {
    group
        .parameters
        .iter()
        .map(|p| format!("  {} {} - {}", p.name, p.type_helper.helper().describe(), p.description))
        .collect()
}

fn set(target: &Node, args: &CommandArgs) -> Result<Vec<String>, ConfigShellError> {
    let requested_group = args.positional.first().map(String::as_str);
    let groups = target.configuration_groups();

    if requested_group.is_none() && args.keyword.is_empty() {
        return Ok(list_groups(&groups));
    }
    if let Some(wanted) = requested_group {
        if args.keyword.is_empty() {
            let group = groups
                .iter()
                .find(|g| g.name == wanted)
                .ok_or_else(|| ConfigShellError::bad_usage("set", format!("no such group '{wanted}'")))?;
            return Ok(describe_group(group));
        }
    }

    let mut out = Vec::new();
    for (key, value) in &args.keyword {
        let (group, param) = find_group_param(&groups, requested_group, key)
            .ok_or_else(|| ConfigShellError::bad_usage("set", format!("unknown parameter '{key}'")))?;
        let helper = param.type_helper.helper();
        let parsed = helper.parse(key, value)?;
        let formatted = helper.format_value(&parsed);
        target.set_group_value(&group.name, key, &formatted)?;
        out.push(format!("{key}={formatted}"));
    }
    Ok(out)
}

fn get(target: &Node, args: &CommandArgs) -> Result<Vec<String>, ConfigShellError> {
    let requested_group = args.positional.first().map(String::as_str);
    let groups = target.configuration_groups();

    let Some(wanted) = requested_group else {
        return Ok(list_groups(&groups));
    };
    let requested_keys = &args.positional[1..];
    let group = groups
        .iter()
        .find(|g| g.name == wanted)
        .ok_or_else(|| ConfigShellError::bad_usage("get", format!("no such group '{wanted}'")))?;

    if requested_keys.is_empty() {
        return Ok(describe_group(group));
    }

    let mut out = Vec::new();
    for param in &group.parameters {
        if !requested_keys.iter().any(|k| k == &param.name) {
            continue;
        }
        let value = target
            .get_group_value(&group.name, &param.name)
            .unwrap_or_else(|| "n/a".to_string());
        out.push(format!("{}={value}", param.name));
    }
    Ok(out)
}

fn find_group_param<'a>(
    groups: &'a [GroupSpec],
    requested_group: Option<&str>,
    key: &str,
) -> Option<(&'a GroupSpec, &'a configshell_core::node::GroupParam)> {
    groups
        .iter()
        .filter(|g| requested_group.map_or(true, |wanted| g.name == wanted))
        .find_map(|g| g.parameters.iter().find(|p| p.name == key).map(|p| (g, p)))
}

#[cfg(test)]
#[path = "builtins_tests.rs"]
mod tests;
