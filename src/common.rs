//! Common functionality shared across commands

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::InputFormat;
use crate::constants::input::{STDIN_ARG, STDIN_NAME};

/// Where a snapshot is read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Interpret a CLI path argument, mapping `-` to stdin
    pub fn from_arg(path: &Path) -> Self {
        if path == Path::new(STDIN_ARG) {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::File(path) => Some(path),
            InputSource::Stdin => None,
        }
    }

    /// Name used in reports and diagnostics
    pub fn name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => STDIN_NAME.to_string(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Snapshot input arguments
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Snapshot files or directories to analyze ('-' for stdin, the default)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// How to interpret snapshots
    #[arg(
        long,
        value_enum,
        default_value = "auto",
        env = "DEADLOCK_LENS_INPUT_FORMAT"
    )]
    pub input_format: InputFormat,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "DEADLOCK_LENS_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Status output arguments
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Suppress status messages on stderr
    #[arg(short, long, env = "DEADLOCK_LENS_QUIET")]
    pub quiet: bool,
}

impl InputArgs {
    /// Get input sources, using stdin if none provided
    pub fn get_sources(&self) -> Vec<InputSource> {
        if self.inputs.is_empty() {
            vec![InputSource::Stdin]
        } else {
            self.inputs
                .iter()
                .map(|p| InputSource::from_arg(p))
                .collect()
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DeadlockLensError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(
        command: crate::cli::Commands,
    ) -> Result<Self, crate::error::DeadlockLensError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::DeadlockLensError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
