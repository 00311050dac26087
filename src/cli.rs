//! Command-line shell over the graph and hooks engines.
//!
//! `graph` commands read JSON from a file or stdin and write to stdout.
//! `hooks` commands talk to the repository's hook endpoints; each one mounts
//! the current lists first so local preconditions are checked before any
//! request is sent.

use std::io::Read;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::config::{self, ConfigError, ServiceConfig};
use crate::graph::assign::{CommitRecord, assign_slots};
use crate::graph::draw::{Drawing, Rect};
use crate::graph::svg::render_svg;
use crate::graph::{CommitGraph, GraphLayout, LayoutError};
use crate::hooks::types::RequestKind;
use crate::hooks::{
    Delivery, HookDescriptor, HookEndpoints, HookError, HookId, HookListController, HookManager, HttpHookService,
    RunScope,
};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Hook(#[from] HookError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no commit is drawn at y={0}")]
    NoRowAt(i64),
    #[error("could not load hook lists from the service")]
    ServiceUnavailable,
    #[error("hook service did not confirm {0:?} request")]
    NotConfirmed(RequestKind),
}

#[derive(Parser, Debug)]
#[command(name = "repograph", about = "Commit graph layout and commit hook management")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Graph(GraphCommand),
    Hooks(HooksCommand),
}

#[derive(Args, Debug)]
pub struct GraphCommand {
    #[command(subcommand)]
    command: GraphSubcommand,
}

#[derive(Subcommand, Debug)]
enum GraphSubcommand {
    /// Lay out a commit graph and print it as SVG or JSON primitives.
    Render {
        #[arg(long, default_value = "-", help = "Graph JSON path, or - for stdin")]
        input: String,
        #[arg(long, value_enum, default_value_t = RenderFormat::Svg)]
        format: RenderFormat,
        #[arg(long, help = "Highlight the commit drawn at this surface y")]
        select_y: Option<i64>,
    },
    /// Assign row/column/series slots to a newest-first commit list.
    Assign {
        #[arg(long, default_value = "-", help = "Commit list JSON path, or - for stdin")]
        input: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderFormat {
    Svg,
    Json,
}

#[derive(Args, Debug)]
pub struct HooksCommand {
    #[arg(long, env = "REPOGRAPH_BASE_URL", help = "Repository admin URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: HooksSubcommand,
}

#[derive(Subcommand, Debug)]
enum HooksSubcommand {
    /// Show active and installable hooks.
    List,
    /// Install a hook at the end of the execution order.
    Add { hook_id: String },
    /// Uninstall a hook.
    Remove { hook_id: String },
    /// Set the execution order: the named hooks run first, in this order.
    Order {
        #[arg(required = true, num_args = 1..)]
        hook_ids: Vec<String>,
    },
    /// Run the active hooks on the last commit, or on all commits.
    Run {
        #[arg(long, default_value_t = false)]
        all: bool,
    },
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns [`CliError`] for unreadable input, layout failures, precondition
/// violations, and unconfirmed service requests.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Graph(graph) => run_graph(graph),
        Command::Hooks(hooks) => run_hooks(hooks).await,
    }
}

// =============================================================================
// GRAPH
// =============================================================================

#[derive(Serialize)]
struct RenderOutput<'a> {
    drawing: &'a Drawing,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<Selection>,
}

#[derive(Serialize)]
struct Selection {
    commit: String,
    url: String,
    highlight: Rect,
}

fn run_graph(cmd: GraphCommand) -> Result<(), CliError> {
    match cmd.command {
        GraphSubcommand::Render { input, format, select_y } => {
            let graph = CommitGraph::from_json(&read_input(&input)?)?;
            let layout = GraphLayout::compute(&graph, config::layout_from_env())?;

            let selected = match select_y {
                Some(y) => {
                    let entry = layout.row_at(y).ok_or(CliError::NoRowAt(y))?;
                    let row = graph.get(&entry.commit).map_or(0, |n| n.row);
                    let highlight = layout.highlight(row).ok_or(CliError::NoRowAt(y))?;
                    Some(Selection { commit: entry.commit.clone(), url: entry.url.clone(), highlight })
                }
                None => None,
            };

            match format {
                RenderFormat::Svg => {
                    print!("{}", render_svg(layout.drawing(), selected.as_ref().map(|s| &s.highlight)));
                }
                RenderFormat::Json => {
                    print_json(&RenderOutput { drawing: layout.drawing(), selected })?;
                }
            }
            Ok(())
        }
        GraphSubcommand::Assign { input } => {
            let history: Vec<CommitRecord> = serde_json::from_str(&read_input(&input)?)?;
            let graph = assign_slots(&history);
            info!(commits = graph.len(), columns = graph.next_column, "graph assigned");
            print_json(&graph)
        }
    }
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "stdin".into(), source })?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// HOOKS
// =============================================================================

async fn run_hooks(cmd: HooksCommand) -> Result<(), CliError> {
    let config = ServiceConfig::from_env(cmd.base_url)?;
    let service = HttpHookService::new(&config, HookEndpoints::default())?;
    let mut manager = HookManager::new(service, HookListController::default());

    if !manager.load_active().await.is_confirmed() || !manager.load_available().await.is_confirmed() {
        return Err(CliError::ServiceUnavailable);
    }

    match cmd.command {
        HooksSubcommand::List => {
            print_lists(manager.controller());
            Ok(())
        }
        HooksSubcommand::Add { hook_id } => {
            let delivery = manager.activate(&HookId::from(hook_id.as_str())).await?;
            confirm(delivery, RequestKind::Add)?;
            print_lists(manager.controller());
            Ok(())
        }
        HooksSubcommand::Remove { hook_id } => {
            let delivery = manager.deactivate(&HookId::from(hook_id.as_str())).await?;
            confirm(delivery, RequestKind::Remove)?;
            print_lists(manager.controller());
            Ok(())
        }
        HooksSubcommand::Order { hook_ids } => {
            let order: Vec<HookId> = hook_ids.iter().map(|raw| HookId::from(raw.as_str())).collect();
            manager.arrange(&order)?;
            let delivery = manager.reorder().await?;
            confirm(delivery, RequestKind::SetOrder)?;
            print_lists(manager.controller());
            Ok(())
        }
        HooksSubcommand::Run { all } => {
            let scope = if all { RunScope::AllCommits } else { RunScope::LastCommit };
            let delivery = manager.run(scope).await;
            if let Some(message) = confirm(delivery, RequestKind::Run)? {
                println!("{message}");
            }
            Ok(())
        }
    }
}

fn confirm(delivery: Delivery, kind: RequestKind) -> Result<Option<String>, CliError> {
    match delivery {
        Delivery::Confirmed { message } => Ok(message),
        Delivery::Failed => Err(CliError::NotConfirmed(kind)),
    }
}

fn print_lists(controller: &HookListController) {
    let view = controller.view();

    println!("Active commit hooks:");
    match view.active_message() {
        Some(msg) => println!("  {msg}"),
        None => print_hooks(controller.active()),
    }
    if let Some(hint) = view.sort_hint() {
        println!("  ({hint})");
    }

    println!("Installable commit hooks:");
    match view.available_message() {
        Some(msg) => println!("  {msg}"),
        None => print_hooks(controller.available()),
    }
}

fn print_hooks(hooks: &[HookDescriptor]) {
    for (i, hook) in hooks.iter().enumerate() {
        let pin = if hook.removable { "" } else { " [pinned]" };
        println!("  {}. {} ({}){pin}", i + 1, hook.name, hook.id);
        if !hook.description.is_empty() {
            println!("     {}", hook.description);
        }
    }
}
