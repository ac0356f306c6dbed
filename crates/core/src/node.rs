// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The configuration node tree: parent/child links, path resolution,
//! and subtree rendering.
//!
//! A [`Node`] is a cheap, clonable handle (`Rc<RefCell<..>>`) around the
//! tree bookkeeping plus a boxed [`NodeOps`] trait object supplying the
//! host application's behavior. The parent link is a `Weak` reference so
//! a detached subtree can be dropped without the root keeping it alive —
//! child ownership is exclusive and lives in the parent's `children`
//! vector.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::ConfigShellError;
use crate::prefs::Preferences;
use crate::ui_type::UiTypeKind;

/// Health reported by a node's summary callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Ok,
    Error,
    Unknown,
}

/// A single tagged-text block. Commands supply structured help data;
/// the (external) console formatter decides how bold/italic/code/etc.
/// are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedText {
    Paragraph(String),
    Bold(String),
    Italic(String),
    Code(String),
    LiteralBlock(String),
    Heading(String),
    ListItem(String),
}

/// One formal parameter in a [`CommandSpec`].
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub required: bool,
    /// Textual default, already formatted, for documentation purposes.
    pub default: Option<String>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default.into()),
        }
    }
}

/// Declared documentation and signature for one node-local command.
///
/// The signature is data, not reflection over the callable: commands are
/// registered explicitly rather than discovered by name convention.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub variadic_positional: bool,
    pub variadic_keyword: bool,
    pub summary: String,
    pub doc: Vec<TaggedText>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            variadic_positional: false,
            variadic_keyword: false,
            summary: summary.into(),
            doc: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn variadic_positional(mut self) -> Self {
        self.variadic_positional = true;
        self
    }

    pub fn variadic_keyword(mut self) -> Self {
        self.variadic_keyword = true;
        self
    }

    pub fn with_doc(mut self, doc: Vec<TaggedText>) -> Self {
        self.doc = doc;
        self
    }

    /// How many of the leading params are required.
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.required).count()
    }
}

/// One parameter in a named configuration group, paired with its type
/// helper and a human description.
#[derive(Debug, Clone)]
pub struct GroupParam {
    pub name: String,
    pub type_helper: UiTypeKind,
    pub description: String,
}

/// A named collection of configuration parameters on a node.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub name: String,
    pub parameters: Vec<GroupParam>,
}

/// Already-bound parameters available to a completion callback: the
/// positional values supplied so far (in order) and the keyword values
/// supplied so far.
#[derive(Debug, Clone, Default)]
pub struct BoundParams {
    pub positional: Vec<String>,
    pub keyword: Vec<(String, String)>,
}

/// Fully marshaled arguments passed to [`NodeOps::invoke`].
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    pub positional: Vec<String>,
    pub keyword: Vec<(String, String)>,
}

/// What a command invocation resulted in, per the dispatcher's
/// interpretation rules: navigate to a node, request shell exit, or do
/// nothing.
pub enum CommandOutcome {
    Navigate(Node),
    Exit,
    None,
}

/// The capability set a host application attaches to a node: its
/// commands, its configuration groups, and its health summary.
pub trait NodeOps {
    /// Declared commands, in the order `help`/completion should present
    /// them.
    fn commands(&self) -> Vec<CommandSpec>;

    /// Execute `command` with marshaled `args`. `CommandNotFound` is
    /// handled by the caller before this is reached; implementations
    /// only need to handle commands they declared in [`NodeOps::commands`].
    fn invoke(&mut self, command: &str, args: &CommandArgs) -> Result<CommandOutcome, ConfigShellError>;

    /// Completion candidates for the parameter named `param_name` of
    /// `command`, given what's already bound and the text typed so far.
    /// Default: no node-specific suggestions.
    fn complete_param(
        &self,
        _command: &str,
        _bound: &BoundParams,
        _text: &str,
        _param_name: &str,
    ) -> Vec<String> {
        Vec::new()
    }

    /// Declared configuration groups. Default: none.
    fn configuration_groups(&self) -> Vec<GroupSpec> {
        Vec::new()
    }

    /// Current formatted value of `group.key`, or `None` if unset.
    fn get_group_value(&self, _group: &str, _key: &str) -> Option<String> {
        None
    }

    /// Store a freshly parsed value into `group.key`.
    fn set_group_value(
        &mut self,
        _group: &str,
        _key: &str,
        _text: &str,
    ) -> Result<(), ConfigShellError> {
        Ok(())
    }

    /// `(status text, health)` shown in the subtree renderer and `ls`.
    fn summary(&self) -> (String, Health) {
        (String::new(), Health::Unknown)
    }

    /// Optional prefix shown before the path in the prompt.
    fn prompt_message(&self) -> Option<String> {
        None
    }
}

struct NodeInner {
    name: String,
    parent: Weak<RefCell<NodeInner>>,
    children: Vec<Node>,
    ops: Box<dyn NodeOps>,
}

/// A cheap, clonable handle to one position in the configuration tree.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeInner>>);

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("path", &self.path()).finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Node {
    /// Create a detached node (no parent) wrapping `ops`.
    pub fn new(name: impl Into<String>, ops: Box<dyn NodeOps>) -> Self {
        Self(Rc::new(RefCell::new(NodeInner {
            name: name.into(),
            parent: Weak::new(),
            children: Vec::new(),
            ops,
        })))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Children in the node's intrinsic (insertion) order — the order
    /// the iter-all wildcard executes commands against.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Children sorted by stringified name, as the subtree renderer
    /// requires.
    pub fn children_sorted(&self) -> Vec<Node> {
        let mut children = self.children();
        children.sort_by(|a, b| a.name().cmp(&b.name()));
        children
    }

    pub fn get_child(&self, name: &str) -> Option<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|c| c.name() == name)
            .cloned()
    }

    pub fn get_root(&self) -> Node {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// `/`-joined ancestor names from the root; the root's own path is
    /// exactly `/`.
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            segments.push(current.name());
            current = parent;
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Attach `child` under this node. Rejects self-insertion, children
    /// that already have a parent, insertions that would create a
    /// cycle, and duplicate sibling names.
    pub fn add_child(&self, child: Node) -> Result<(), ConfigShellError> {
        if child == *self {
            return Err(ConfigShellError::execution_error(
                "add_child",
                "a node cannot be its own parent",
            ));
        }
        if child.parent().is_some() {
            return Err(ConfigShellError::execution_error(
                "add_child",
                format!("'{}' is already attached to a parent", child.name()),
            ));
        }
        // Walk this node's ancestors: if `child` is one of them, attaching
        // it here would create a cycle.
        let mut ancestor = self.parent();
        while let Some(a) = ancestor {
            if a == child {
                return Err(ConfigShellError::execution_error(
                    "add_child",
                    "insertion would create a cycle",
                ));
            }
            ancestor = a.parent();
        }
        if self.get_child(&child.name()).is_some() {
            return Err(ConfigShellError::execution_error(
                "add_child",
                format!("a child named '{}' already exists", child.name()),
            ));
        }

        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child);
        Ok(())
    }

    /// Detach and return the child named `name`, if any.
    pub fn del_child(&self, name: &str) -> Option<Node> {
        let mut inner = self.0.borrow_mut();
        let index = inner.children.iter().position(|c| c.name() == name)?;
        let child = inner.children.remove(index);
        child.0.borrow_mut().parent = Weak::new();
        Some(child)
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.0.borrow().ops.commands()
    }

    pub fn configuration_groups(&self) -> Vec<GroupSpec> {
        self.0.borrow().ops.configuration_groups()
    }

    pub fn get_group_value(&self, group: &str, key: &str) -> Option<String> {
        self.0.borrow().ops.get_group_value(group, key)
    }

    pub fn set_group_value(&self, group: &str, key: &str, text: &str) -> Result<(), ConfigShellError> {
        self.0.borrow_mut().ops.set_group_value(group, key, text)
    }

    pub fn summary(&self) -> (String, Health) {
        self.0.borrow().ops.summary()
    }

    pub fn prompt_message(&self) -> Option<String> {
        self.0.borrow().ops.prompt_message()
    }

    pub fn complete_param(
        &self,
        command: &str,
        bound: &BoundParams,
        text: &str,
        param_name: &str,
    ) -> Vec<String> {
        self.0
            .borrow()
            .ops
            .complete_param(command, bound, text, param_name)
    }

    /// Look up `command` and invoke it. Arity mismatches and unknown
    /// commands are reported as the dispatcher-facing error kinds; a
    /// command's own `ExecutionError` propagates with its message intact.
    pub fn execute_command(
        &self,
        command: &str,
        args: &CommandArgs,
    ) -> Result<CommandOutcome, ConfigShellError> {
        let spec = self
            .commands()
            .into_iter()
            .find(|c| c.name == command)
            .ok_or_else(|| ConfigShellError::command_not_found(command))?;

        // A required parameter is satisfied either by position or by an
        // explicit keyword naming it; required params are always the
        // leading slots (spec's Command signature), so index < position
        // count is equivalent to "bound positionally".
        let required = spec.required_count();
        for (i, param) in spec.params.iter().take(required).enumerate() {
            let bound = i < args.positional.len() || args.keyword.iter().any(|(k, _)| k == &param.name);
            if !bound {
                return Err(ConfigShellError::bad_usage(
                    command,
                    format!("missing required parameter '{}', see 'help {command}'", param.name),
                ));
            }
        }
        if !spec.variadic_positional && args.positional.len() > spec.params.len() {
            return Err(ConfigShellError::bad_usage(
                command,
                format!("too many positional parameters, see 'help {command}'"),
            ));
        }
        if !spec.variadic_keyword {
            let declared: Vec<&str> = spec.params.iter().map(|p| p.name.as_str()).collect();
            for (key, _) in &args.keyword {
                if !declared.contains(&key.as_str()) {
                    return Err(ConfigShellError::bad_usage(
                        command,
                        format!("unknown keyword parameter '{key}', see 'help {command}'"),
                    ));
                }
            }
        }

        self.0.borrow_mut().ops.invoke(command, args)
    }
}

/// Resolve `raw_path` starting from `start`, per the ordered rules:
/// empty-means-`.`, `@bookmark` substitution, slash collapsing, leading
/// `/` switches to root, segment-by-segment walk (`.`/`..`/exact name),
/// and a trailing `*` stripped into the returned iter-all flag.
pub fn resolve_path(
    start: &Node,
    raw_path: &str,
    prefs: &Preferences,
) -> Result<(Node, bool), ConfigShellError> {
    let mut path = if raw_path.is_empty() {
        ".".to_string()
    } else {
        raw_path.to_string()
    };

    if let Some(name) = path.strip_prefix('@') {
        let bookmarks = prefs.bookmarks();
        let target = bookmarks
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigShellError::bad_bookmark(name))?;
        path = target;
    }

    let mut collapsed = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                collapsed.push('/');
            }
            prev_slash = true;
        } else {
            collapsed.push(ch);
            prev_slash = false;
        }
    }
    if collapsed.len() > 1 && collapsed.ends_with('/') {
        collapsed.pop();
    }
    let mut path = collapsed;

    let mut current = if path.starts_with('/') {
        path = path.trim_start_matches('/').to_string();
        start.get_root()
    } else {
        start.clone()
    };

    let mut segments: Vec<String> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').map(|s| s.to_string()).collect()
    };

    let mut iter_all = false;
    if let Some(last) = segments.last().cloned() {
        if let Some(stripped) = last.strip_suffix('*') {
            iter_all = true;
            if stripped.is_empty() {
                segments.pop();
            } else {
                let len = segments.len();
                segments[len - 1] = stripped.to_string();
            }
        }
    }

    for segment in &segments {
        match segment.as_str() {
            "" | "." => {}
            ".." => {
                current = current.parent().unwrap_or(current);
            }
            name => {
                current = current
                    .get_child(name)
                    .ok_or_else(|| ConfigShellError::bad_path(name))?;
            }
        }
    }

    Ok((current, iter_all))
}

/// One rendered line of a subtree drawing: structured so the (external)
/// console formatter can apply color without the tree builder knowing
/// about ANSI escapes.
#[derive(Debug, Clone)]
pub struct TreeLine {
    pub path: String,
    pub depth: usize,
    /// `depth % 3`, the renderer's color bucket.
    pub color_bucket: u8,
    pub prefix: String,
    pub name: String,
    pub dotfill: String,
    pub status: String,
    pub health: Health,
}

impl TreeLine {
    /// Plain-text rendering with no color, used by the interactive `cd`
    /// picker's list mode.
    pub fn plain(&self) -> String {
        format!(
            "{}{}{} [{}]",
            self.prefix, self.name, self.dotfill, self.status
        )
    }
}

/// Render the subtree rooted at `root` as an ordered list of [`TreeLine`]s.
///
/// `max_depth` of `None` means unlimited; `width` is the terminal width
/// used to pad each line's dotfill.
pub fn render_tree(
    root: &Node,
    max_depth: Option<usize>,
    prefs: &Preferences,
    width: usize,
) -> Vec<TreeLine> {
    let round_nodes = prefs
        .get("tree_round_nodes")
        .and_then(crate::prefs::PrefValue::as_bool)
        .unwrap_or(false);
    let show_root = prefs
        .get("tree_show_root")
        .and_then(crate::prefs::PrefValue::as_bool)
        .unwrap_or(true);

    let mut lines = Vec::new();
    let nodechar = if round_nodes { 'o' } else { '+' };

    if show_root {
        push_tree_line(root, 0, "", nodechar, width, &mut lines);
    }

    if max_depth == Some(0) {
        return lines;
    }

    render_children(root, 0, Vec::new(), max_depth, nodechar, width, &mut lines);
    lines
}

fn render_children(
    node: &Node,
    depth: usize,
    ancestors_have_more: Vec<bool>,
    max_depth: Option<usize>,
    nodechar: char,
    width: usize,
    out: &mut Vec<TreeLine>,
) {
    if let Some(max) = max_depth {
        if depth >= max {
            return;
        }
    }
    let children = node.children_sorted();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let has_more = i + 1 < count;
        let mut runner = String::new();
        for &more in &ancestors_have_more {
            runner.push_str(if more { "| " } else { "  " });
        }
        push_tree_line(&child, depth + 1, &runner, nodechar, width, out);

        let mut next_ancestors = ancestors_have_more.clone();
        next_ancestors.push(has_more);
        render_children(&child, depth + 1, next_ancestors, max_depth, nodechar, width, out);
    }
}

fn push_tree_line(node: &Node, depth: usize, runner: &str, nodechar: char, width: usize, out: &mut Vec<TreeLine>) {
    let (status, health) = node.summary();
    let name = node.name();
    let name_display = if node.is_root() { "/".to_string() } else { name };
    let prefix = format!("{runner}{nodechar} ");
    let status_bracket = format!("[{status}]");
    let content_len = prefix.chars().count() + name_display.chars().count();
    let dots_len = width
        .saturating_sub(content_len + status_bracket.chars().count() + 1)
        .max(1);

    out.push(TreeLine {
        path: node.path(),
        depth,
        color_bucket: (depth % 3) as u8,
        prefix,
        name: name_display,
        dotfill: ".".repeat(dots_len),
        status,
        health,
    });
}

/// List-mode rendering: parallel plain-text lines and their node paths,
/// as consumed by the interactive `cd` picker.
pub fn render_tree_list(
    root: &Node,
    max_depth: Option<usize>,
    prefs: &Preferences,
    width: usize,
) -> (Vec<String>, Vec<String>) {
    let lines = render_tree(root, max_depth, prefs, width);
    let texts = lines.iter().map(TreeLine::plain).collect();
    let paths = lines.into_iter().map(|l| l.path).collect();
    (texts, paths)
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
