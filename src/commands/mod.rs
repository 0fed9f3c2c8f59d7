//! Command implementations for the deadlock-lens CLI
//!
//! - check: Analyze snapshots and report their deadlocks
//! - graph: Render one snapshot's wait-for graph

pub mod check;
pub mod graph;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Check { .. } => check::execute_check_command(command),
        Commands::Graph { .. } => graph::execute_graph_command(command),
    }
}
