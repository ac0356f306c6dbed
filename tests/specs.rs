// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios against the public `configshell` surface, one per
//! literal example in the design document's testable-properties section:
//! tree listing, path navigation, bookmarks, completion, positional/keyword
//! parameter binding, and configuration get/set.

use std::cell::RefCell;
use std::rc::Rc;

use configshell::{dispatch, Collaborators};
use configshell_core::node::{
    resolve_path, render_tree, CommandArgs, CommandOutcome, CommandSpec, GroupParam, GroupSpec,
    Health, Node, NodeOps, ParamSpec,
};
use configshell_core::ui_type::UiTypeKind;
use configshell_core::{ConfigShellError, Preferences};
use configshell_grammar::parse;

struct PlainOps;

impl NodeOps for PlainOps {
    fn commands(&self) -> Vec<CommandSpec> {
        Vec::new()
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, ConfigShellError> {
        Err(ConfigShellError::command_not_found(command))
    }
}

fn run(current: &Node, line: &str, prefs: &mut Preferences) -> configshell::DispatchOutput {
    let parsed = parse(line);
    dispatch(current, &parsed, line, prefs, &Collaborators::default()).expect("dispatch succeeds")
}

/// root -> {a -> {x, y}, b}, the tree named by the design document's
/// literal `ls`/navigation scenarios.
fn scenario_tree() -> Node {
    let root = Node::new("", Box::new(PlainOps));
    let a = Node::new("a", Box::new(PlainOps));
    a.add_child(Node::new("x", Box::new(PlainOps))).unwrap();
    a.add_child(Node::new("y", Box::new(PlainOps))).unwrap();
    root.add_child(a).unwrap();
    root.add_child(Node::new("b", Box::new(PlainOps))).unwrap();
    root
}

#[test]
fn ls_from_root_lists_every_node_at_its_depth_bucket() {
    let root = scenario_tree();
    let prefs = Preferences::default();
    let lines = render_tree(&root, None, &prefs, 80);

    assert_eq!(lines.len(), 5);
    let by_name: Vec<(&str, usize)> = lines.iter().map(|l| (l.name.as_str(), l.depth)).collect();
    assert_eq!(by_name, vec![("/", 0), ("a", 1), ("x", 2), ("y", 2), ("b", 1)]);
    assert_eq!(lines[1].color_bucket, 1);
    assert_eq!(lines[2].color_bucket, 2);
}

#[test]
fn cd_navigates_relative_parent_and_root() {
    let root = scenario_tree();
    let prefs = Preferences::default();

    let (ax, _) = resolve_path(&root, "a/x", &prefs).unwrap();
    assert_eq!(ax.path(), "/a/x");

    let (a, _) = resolve_path(&ax, "..", &prefs).unwrap();
    assert_eq!(a.path(), "/a");

    let (back_to_root, _) = resolve_path(&ax, "/", &prefs).unwrap();
    assert_eq!(back_to_root.path(), "/");
}

#[test]
fn bookmark_add_use_and_delete_round_trips_through_resolve_path() {
    let root = scenario_tree();
    let mut prefs = Preferences::default();
    let (ax, _) = resolve_path(&root, "a/x", &prefs).unwrap();

    prefs.bookmark_add("here", &ax.path()).unwrap();
    let (resolved, _) = resolve_path(&root, "@here", &prefs).unwrap();
    assert_eq!(resolved.path(), "/a/x");

    assert!(prefs.bookmark_del("here").unwrap());
    let err = resolve_path(&root, "@here", &prefs).unwrap_err();
    assert!(matches!(err, ConfigShellError::BadBookmark { .. }));
}

#[test]
fn path_completion_adds_trailing_slash_only_for_children_with_their_own_children() {
    let root = Node::new("", Box::new(PlainOps));
    let a = Node::new("a", Box::new(PlainOps));
    let x = Node::new("x", Box::new(PlainOps));
    x.add_child(Node::new("x1", Box::new(PlainOps))).unwrap();
    let y = Node::new("y", Box::new(PlainOps));
    y.add_child(Node::new("y1", Box::new(PlainOps))).unwrap();
    a.add_child(x).unwrap();
    a.add_child(y).unwrap();
    root.add_child(a).unwrap();

    let prefs = Preferences::default();
    let (candidates, _) = configshell::completion::complete(&root, &prefs, "/a/", 0, 3);
    // "a" has two children, so the wildcard entry is also offered per the
    // path strategy's "empty or '*' partial name, more than one child" rule.
    assert_eq!(candidates, vec!["/a/x/".to_string(), "/a/y/".to_string(), "/a/* ".to_string()]);
}

#[test]
fn path_completion_on_an_iterator_wildcard_offers_only_the_wildcard_itself() {
    let root = scenario_tree();
    let prefs = Preferences::default();

    // "/a/* " with the cursor just before the trailing space: the token
    // under the cursor is "/a/*", spanning [0, 4).
    let (candidates, _) = configshell::completion::complete(&root, &prefs, "/a/* ", 0, 4);
    assert_eq!(candidates, vec!["/a/* ".to_string()]);
}

struct GreetOps {
    last_greeting: Rc<RefCell<Option<String>>>,
}

impl NodeOps for GreetOps {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![CommandSpec::new("greet", "Greet someone, loudly or not.")
            .with_param(ParamSpec::required("name"))
            .with_param(ParamSpec::optional("loud", "false"))]
    }

    fn invoke(&mut self, command: &str, args: &CommandArgs) -> Result<CommandOutcome, ConfigShellError> {
        if command != "greet" {
            return Err(ConfigShellError::command_not_found(command));
        }

        // Positional args fill "name" then "loud" in declared order; a
        // keyword overrides whichever slot it names, matching how every
        // other node in this workspace reconciles position with keyword.
        let mut name = None;
        let mut loud = None;
        let params = ["name", "loud"];
        for (i, value) in args.positional.iter().enumerate() {
            match params.get(i) {
                Some(&"name") => name = Some(value.clone()),
                Some(&"loud") => loud = Some(value.clone()),
                _ => {}
            }
        }
        for (key, value) in &args.keyword {
            match key.as_str() {
                "name" => name = Some(value.clone()),
                "loud" => loud = Some(value.clone()),
                _ => {}
            }
        }

        let name = name.ok_or_else(|| ConfigShellError::bad_usage("greet", "missing 'name'"))?;
        let loud = loud.as_deref() == Some("true");
        let greeting = if loud { format!("HELLO, {}!", name.to_uppercase()) } else { format!("hello, {name}") };
        *self.last_greeting.borrow_mut() = Some(greeting);
        Ok(CommandOutcome::None)
    }
}

fn greet_tree() -> (Node, Rc<RefCell<Option<String>>>) {
    let last_greeting = Rc::new(RefCell::new(None));
    let root = Node::new("", Box::new(GreetOps { last_greeting: last_greeting.clone() }));
    (root, last_greeting)
}

#[test]
fn greet_binds_identically_by_keyword_or_by_position() {
    let (root, last_greeting) = greet_tree();
    let mut prefs = Preferences::default();

    run(&root, "greet loud=true name=world", &mut prefs);
    let by_keyword = last_greeting.borrow().clone().unwrap();

    run(&root, "greet world true", &mut prefs);
    let by_position = last_greeting.borrow().clone().unwrap();

    assert_eq!(by_keyword, "HELLO, WORLD!");
    assert_eq!(by_keyword, by_position);
}

#[test]
fn greet_with_one_argument_too_many_fails_bad_usage() {
    let (root, _last_greeting) = greet_tree();
    let mut prefs = Preferences::default();

    let parsed = parse("greet world true extra");
    let err = dispatch(&root, &parsed, "greet world true extra", &mut prefs, &Collaborators::default()).unwrap_err();
    assert!(matches!(err, ConfigShellError::BadUsage { .. }));
}

/// A node exposing a `global` configuration group over an in-memory
/// `prompt_length`, standing in for the preferences-backed group a host
/// application would wire to its own `Preferences` store.
struct GlobalGroupOps {
    prompt_length: i64,
}

impl NodeOps for GlobalGroupOps {
    fn commands(&self) -> Vec<CommandSpec> {
        Vec::new()
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, ConfigShellError> {
        Err(ConfigShellError::command_not_found(command))
    }

    fn configuration_groups(&self) -> Vec<GroupSpec> {
        vec![GroupSpec {
            name: "global".to_string(),
            parameters: vec![GroupParam {
                name: "prompt_length".to_string(),
                type_helper: UiTypeKind::Number,
                description: "Prompt elision length.".to_string(),
            }],
        }]
    }

    fn get_group_value(&self, group: &str, key: &str) -> Option<String> {
        (group == "global" && key == "prompt_length").then(|| self.prompt_length.to_string())
    }

    fn set_group_value(&mut self, group: &str, key: &str, text: &str) -> Result<(), ConfigShellError> {
        if group == "global" && key == "prompt_length" {
            self.prompt_length = text.parse().map_err(|_| ConfigShellError::bad_value(key, "not a number"))?;
        }
        Ok(())
    }
}

#[test]
fn set_then_get_on_a_configuration_group_round_trips_the_normalized_value() {
    let root = Node::new("", Box::new(GlobalGroupOps { prompt_length: 30 }));
    let mut prefs = Preferences::default();

    let set_out = run(&root, "set global prompt_length=10", &mut prefs);
    assert_eq!(set_out.lines, vec!["prompt_length=10".to_string()]);

    let get_out = run(&root, "get global prompt_length", &mut prefs);
    assert_eq!(get_out.lines, vec!["prompt_length=10".to_string()]);
}

#[test]
fn set_with_a_value_that_fails_parsing_reports_bad_value_and_leaves_the_store_unchanged() {
    let root = Node::new("", Box::new(GlobalGroupOps { prompt_length: 30 }));
    let mut prefs = Preferences::default();

    let parsed = parse("set global prompt_length=abc");
    let err = dispatch(&root, &parsed, "set global prompt_length=abc", &mut prefs, &Collaborators::default()).unwrap_err();
    assert!(matches!(err, ConfigShellError::BadValue { .. }));

    let get_out = run(&root, "get global prompt_length", &mut prefs);
    assert_eq!(get_out.lines, vec!["prompt_length=30".to_string()]);
}

#[test]
fn preferences_save_and_load_round_trips_bookmarks_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut prefs = Preferences::load(&path, true).unwrap();
    prefs.bookmark_add("here", "/a/x").unwrap();
    prefs.record_path("/a/x").unwrap();
    prefs.set("prompt_length", configshell_core::PrefValue::Int(12)).unwrap();

    let reloaded = Preferences::load(&path, false).unwrap();
    similar_asserts::assert_eq!(reloaded.bookmarks(), prefs.bookmarks());
    assert_eq!(reloaded.path_history(), prefs.path_history());
    assert_eq!(reloaded.get("prompt_length").and_then(|v| v.as_int()), Some(12));

    // The on-disk format is a plain JSON object keyed by preference name.
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("prompt_length").is_some());
}
