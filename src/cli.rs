use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{FormatArgs, InputArgs, StatusArgs};

#[derive(Parser)]
#[command(
    name = "deadlock-lens",
    about = "🔒 Detect deadlocks in wait-for graph snapshots",
    long_about = "deadlock-lens reads wait-for relations ('P1 -> P2' means P1 is blocked waiting \
                  for P2), builds a wait-for graph, and searches it for cycles. Any cycle, \
                  including a process waiting on itself, is a deadlock.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check wait-for snapshots for deadlocks
    ///
    /// Reads one or more snapshots, builds a wait-for graph for each, and
    /// reports the first deadlock cycle found in every snapshot.
    #[command(
        long_about = "Check wait-for snapshots for deadlocks. Each input is a file, a directory \
                      (scanned for .wfg, .txt and .json files), or '-' for stdin; with no \
                      inputs, stdin is read. Every snapshot gets its own graph and is analyzed \
                      independently with a deterministic depth-first search, so the same \
                      snapshot always reports the same cycle."
    )]
    Check {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        status: StatusArgs,

        /// Exit with error code if any snapshot is deadlocked
        #[arg(long, env = "DEADLOCK_LENS_ERROR_ON_DEADLOCK")]
        error_on_deadlock: bool,
    },

    /// Render a wait-for snapshot as a diagram
    ///
    /// Draws the wait-for graph of a single snapshot, highlighting the
    /// processes and edges of the deadlock ring.
    #[command(
        long_about = "Render the wait-for graph of one snapshot as ASCII, a Mermaid diagram, or \
                      a Graphviz DOT file. The deadlock ring, if any, is highlighted, including \
                      the edge that closes it back to its first process."
    )]
    Graph {
        /// Snapshot to render ('-' or omitted for stdin)
        #[arg(value_name = "INPUT", env = "DEADLOCK_LENS_INPUT")]
        input: Option<PathBuf>,

        /// How to interpret the snapshot
        #[arg(
            long,
            value_enum,
            default_value = "auto",
            env = "DEADLOCK_LENS_INPUT_FORMAT"
        )]
        input_format: InputFormat,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_GRAPH_FORMAT,
            env = "DEADLOCK_LENS_GRAPH_FORMAT"
        )]
        format: GraphFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "DEADLOCK_LENS_OUTPUT")]
        output: Option<PathBuf>,

        /// Highlight the deadlock ring in the graph
        #[arg(
            long,
            action = clap::ArgAction::Set,
            default_value = "true",
            env = "DEADLOCK_LENS_HIGHLIGHT_DEADLOCK"
        )]
        highlight_deadlock: bool,

        #[command(flatten)]
        status: StatusArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Junit,
    #[value(name = "github")]
    GitHub,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GraphFormat {
    Ascii,
    Mermaid,
    Dot,
}

/// How a snapshot's contents are interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `json` for `.json` files, `text` for everything else
    Auto,
    /// One `WAITER -> HOLDER` or `WAITER HOLDER` statement per line
    Text,
    /// A JSON array of `{"waiter": ..., "holder": ...}` records
    Json,
}
