//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand, InputSource};
use crate::config::GraphOptions;
use crate::error::DeadlockLensError;

impl FromCommand for GraphOptions {
    fn from_command(command: Commands) -> Result<Self, DeadlockLensError> {
        match command {
            Commands::Graph {
                input,
                input_format,
                format,
                output,
                highlight_deadlock,
                status,
            } => GraphOptions::builder()
                .with_input(
                    input
                        .as_deref()
                        .map_or(InputSource::Stdin, InputSource::from_arg),
                )
                .with_input_format(input_format)
                .with_format(format)
                .with_output(output)
                .with_highlight_deadlock(highlight_deadlock)
                .with_quiet(status.quiet)
                .build(),
            _ => Err(DeadlockLensError::ConfigurationError {
                message: "Invalid command type for GraphOptions".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command for rendering a wait-for graph
pub fn execute_graph_command(command: Commands) -> Result<()> {
    let config = GraphOptions::from_command(command)
        .wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
