use super::*;
use configshell_core::node::{CommandArgs, CommandOutcome, CommandSpec, Health, NodeOps};
use configshell_core::{ConfigShellError, Preferences};
use std::io::Write;

struct PlainNode;

impl NodeOps for PlainNode {
    fn commands(&self) -> Vec<CommandSpec> {
        Vec::new()
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, ConfigShellError> {
        Err(ConfigShellError::command_not_found(command))
    }

    fn summary(&self) -> (String, Health) {
        (String::new(), Health::Unknown)
    }
}

fn tree() -> Node {
    let root = Node::new("", Box::new(PlainNode));
    let child = Node::new("child", Box::new(PlainNode));
    root.add_child(child).unwrap();
    root
}

#[test]
fn elide_keeps_total_length_and_centers_ellipsis() {
    let elided = elide("/a/very/long/path/indeed", 10);
    assert_eq!(elided.chars().count(), 10);
    assert!(elided.contains("..."));
}

#[test]
fn elide_on_a_length_shorter_than_the_ellipsis_truncates_the_ellipsis_itself() {
    assert_eq!(elide("/anything", 2), "..");
}

#[test]
fn format_prompt_elides_when_prompt_length_is_configured_and_shorter_than_path() {
    let root = tree();
    let child = root.get_child("child").unwrap();
    let mut prefs = Preferences::with_defaults();
    prefs.set("prompt_length", configshell_core::PrefValue::Int(3)).unwrap();

    let prompt = format_prompt(&child, &prefs);
    assert!(prompt.ends_with("> "));
    assert!(prompt.len() < child.path().len() + 2);
}

#[test]
fn format_prompt_shows_full_path_when_shorter_than_the_configured_length() {
    let root = tree();
    let prefs = Preferences::with_defaults();
    assert_eq!(format_prompt(&root, &prefs), "/> ");
}

#[test]
fn layout_columns_wraps_after_the_computed_column_count() {
    let candidates = vec!["a".to_string(), "bb".to_string(), "ccc".to_string(), "dddd".to_string()];
    let out = layout_columns(&candidates, 12);
    // col_width = max_length(4) + 2 = 6, columns = 12/6 = 2, so a newline
    // appears after every second candidate.
    assert_eq!(out.matches('\n').count(), 1);
}

#[test]
fn layout_columns_on_empty_input_is_empty() {
    assert_eq!(layout_columns(&[], 80), "");
}

#[test]
fn execute_line_on_blank_input_is_a_no_op() {
    let root = tree();
    let mut repl = Repl::new(root, Preferences::default());
    assert_eq!(repl.execute_line("").unwrap(), false);
}

#[test]
fn execute_line_navigates_current_node() {
    let root = tree();
    let mut repl = Repl::new(root, Preferences::default());
    assert_eq!(repl.execute_line("./child").unwrap(), false);
    assert_eq!(repl.current_node().path(), "/child");
}

#[test]
fn execute_line_on_exit_requests_shell_exit() {
    let root = tree();
    let mut repl = Repl::new(root, Preferences::default());
    assert_eq!(repl.execute_line("exit").unwrap(), true);
}

#[test]
fn run_script_executes_every_line_in_sequence() {
    let root = tree();
    let mut repl = Repl::new(root, Preferences::default());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "./child").unwrap();
    writeln!(file, "pwd").unwrap();
    repl.run_script(file.path(), true).unwrap();

    assert_eq!(repl.current_node().path(), "/child");
}

#[test]
fn run_script_stops_on_first_error_when_exit_on_error_is_set() {
    let root = tree();
    let mut repl = Repl::new(root, Preferences::default());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bogus").unwrap();
    writeln!(file, "./child").unwrap();
    repl.run_script(file.path(), true).unwrap();

    assert_eq!(repl.current_node().path(), "/");
}
