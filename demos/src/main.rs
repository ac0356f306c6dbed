// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A runnable example wiring `configshell` up against a toy configuration
//! tree: a `network/` node with a settable `mtu`/`hostname` group and an
//! `interfaces` node exposing an `up`/`down` command per leaf.
//!
//! A thin `clap` front end decides whether to run interactively, run a
//! script, or read commands from stdin; the real behavior lives in
//! `configshell`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use configshell::Repl;
use configshell_core::node::{
    CommandArgs, CommandOutcome, CommandSpec, GroupParam, GroupSpec, Health, Node, NodeOps, ParamSpec,
};
use configshell_core::ui_type::UiTypeKind;
use configshell_core::Preferences;

#[derive(Parser)]
#[command(name = "configshell-demo", about = "Interactive demo of the configshell framework")]
struct Cli {
    /// Run the named script non-interactively instead of opening a prompt.
    #[arg(long)]
    script: Option<std::path::PathBuf>,

    /// Stop a script on the first error instead of continuing.
    #[arg(long, requires = "script")]
    exit_on_error: bool,

    /// Read commands from stdin instead of opening an interactive prompt.
    #[arg(long, conflicts_with = "script")]
    stdin: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = configshell::resolve_paths().context("resolving preferences paths")?;
    let prefs = Preferences::load(&paths.prefs_file, true).context("loading preferences")?;
    let _log_guard = configshell::logging::init(&prefs);

    let root = build_tree().context("building the demo configuration tree")?;
    let mut repl = Repl::new(root, prefs).with_history_path(paths.history_file);

    if let Some(script) = cli.script {
        repl.run_script(&script, cli.exit_on_error)?;
    } else if cli.stdin {
        repl.run_stdin(cli.exit_on_error)?;
    } else {
        repl.run_interactive()?;
    }

    Ok(())
}

/// `/` -> `network` (mtu, hostname), `network/interfaces` -> `eth0`, `eth1`
/// (each an `up`/`down` leaf), `system` (a single `reboot` command).
fn build_tree() -> Result<Node> {
    let root = Node::new("", Box::new(RootOps));

    let network = Node::new("network", Box::new(NetworkOps::new()));
    let interfaces = Node::new("interfaces", Box::new(GroupingOps));
    for name in ["eth0", "eth1"] {
        interfaces.add_child(Node::new(name, Box::new(InterfaceOps::new(name))))?;
    }
    network.add_child(interfaces)?;
    root.add_child(network)?;

    let system = Node::new("system", Box::new(SystemOps));
    root.add_child(system)?;

    Ok(root)
}

struct RootOps;

impl NodeOps for RootOps {
    fn commands(&self) -> Vec<CommandSpec> {
        Vec::new()
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, configshell_core::ConfigShellError> {
        Err(configshell_core::ConfigShellError::command_not_found(command))
    }

    fn summary(&self) -> (String, Health) {
        ("demo tree".to_string(), Health::Ok)
    }
}

/// A node with no commands of its own, purely a grouping point.
struct GroupingOps;

impl NodeOps for GroupingOps {
    fn commands(&self) -> Vec<CommandSpec> {
        Vec::new()
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, configshell_core::ConfigShellError> {
        Err(configshell_core::ConfigShellError::command_not_found(command))
    }
}

struct NetworkOps {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl NetworkOps {
    fn new() -> Self {
        let mut values = BTreeMap::new();
        values.insert("mtu".to_string(), "1500".to_string());
        values.insert("hostname".to_string(), "demo-host".to_string());
        Self {
            values: Rc::new(RefCell::new(values)),
        }
    }
}

impl NodeOps for NetworkOps {
    fn commands(&self) -> Vec<CommandSpec> {
        Vec::new()
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, configshell_core::ConfigShellError> {
        Err(configshell_core::ConfigShellError::command_not_found(command))
    }

    fn configuration_groups(&self) -> Vec<GroupSpec> {
        vec![GroupSpec {
            name: "global".to_string(),
            parameters: vec![
                GroupParam {
                    name: "mtu".to_string(),
                    type_helper: UiTypeKind::Number,
                    description: "Maximum transmission unit, in bytes.".to_string(),
                },
                GroupParam {
                    name: "hostname".to_string(),
                    type_helper: UiTypeKind::String,
                    description: "Hostname advertised on the network.".to_string(),
                },
            ],
        }]
    }

    fn get_group_value(&self, group: &str, key: &str) -> Option<String> {
        if group != "global" {
            return None;
        }
        self.values.borrow().get(key).cloned()
    }

    fn set_group_value(&mut self, group: &str, key: &str, text: &str) -> Result<(), configshell_core::ConfigShellError> {
        if group == "global" {
            self.values.borrow_mut().insert(key.to_string(), text.to_string());
        }
        Ok(())
    }

    fn summary(&self) -> (String, Health) {
        let hostname = self.values.borrow().get("hostname").cloned().unwrap_or_default();
        (format!("hostname={hostname}"), Health::Ok)
    }
}

struct InterfaceOps {
    name: &'static str,
    up: bool,
}

impl InterfaceOps {
    fn new(name: &'static str) -> Self {
        Self { name, up: true }
    }
}

impl NodeOps for InterfaceOps {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("up", "Bring this interface up."),
            CommandSpec::new("down", "Take this interface down."),
        ]
    }

    fn invoke(&mut self, command: &str, _args: &CommandArgs) -> Result<CommandOutcome, configshell_core::ConfigShellError> {
        match command {
            "up" => {
                self.up = true;
                Ok(CommandOutcome::None)
            }
            "down" => {
                self.up = false;
                Ok(CommandOutcome::None)
            }
            _ => Err(configshell_core::ConfigShellError::command_not_found(command)),
        }
    }

    fn summary(&self) -> (String, Health) {
        if self.up {
            (format!("{} up", self.name), Health::Ok)
        } else {
            (format!("{} down", self.name), Health::Error)
        }
    }
}

struct SystemOps;

impl NodeOps for SystemOps {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![CommandSpec::new("reboot", "Pretend to reboot the demo host.").with_param(ParamSpec::optional("delay", "0"))]
    }

    fn invoke(&mut self, command: &str, args: &CommandArgs) -> Result<CommandOutcome, configshell_core::ConfigShellError> {
        match command {
            "reboot" => {
                let delay = args.positional.first().map(String::as_str).unwrap_or("0");
                println!("rebooting in {delay}s (demo only, nothing actually happens)");
                Ok(CommandOutcome::None)
            }
            _ => Err(configshell_core::ConfigShellError::command_not_found(command)),
        }
    }

    fn summary(&self) -> (String, Health) {
        ("idle".to_string(), Health::Ok)
    }
}
