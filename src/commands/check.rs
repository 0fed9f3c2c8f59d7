//! Check command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::CheckConfig;
use crate::error::DeadlockLensError;

impl FromCommand for CheckConfig {
    fn from_command(command: Commands) -> Result<Self, DeadlockLensError> {
        match command {
            Commands::Check {
                input,
                format,
                status,
                error_on_deadlock,
            } => CheckConfig::builder()
                .with_inputs(input.get_sources())
                .with_input_format(input.input_format)
                .with_format(format.format)
                .with_error_on_deadlock(error_on_deadlock)
                .with_quiet(status.quiet)
                .build(),
            _ => Err(DeadlockLensError::ConfigurationError {
                message: "Invalid command type for CheckConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CheckConfig);

/// Execute the check command for detecting deadlocks in snapshots
pub fn execute_check_command(command: Commands) -> Result<()> {
    let config = CheckConfig::from_command(command)
        .wrap_err("Failed to parse check command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::check::CheckExecutor;
    CheckExecutor::execute(config)
}
