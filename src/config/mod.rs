//! # Configuration Module
//!
//! Configuration structures for the deadlock-lens commands. Each command has
//! its own config with a builder; commands convert parsed CLI arguments into
//! these through [`FromCommand`](crate::common::FromCommand).
//!
//! ## Command Configurations
//!
//! - **CheckConfig**: Configuration for the `check` command
//! - **GraphOptions**: Configuration for the `graph` command
//!
//! ## Example
//!
//! ```
//! use deadlock_lens::cli::{GraphFormat, InputFormat, OutputFormat};
//! use deadlock_lens::common::{ConfigBuilder, InputSource};
//! use deadlock_lens::config::{CheckConfig, GraphOptions};
//!
//! # fn main() -> Result<(), deadlock_lens::error::DeadlockLensError> {
//! let check = CheckConfig::builder()
//!     .with_inputs(vec![InputSource::Stdin])
//!     .with_input_format(InputFormat::Text)
//!     .with_format(OutputFormat::Json)
//!     .with_error_on_deadlock(true)
//!     .with_quiet(true)
//!     .build()?;
//! assert!(check.error_on_deadlock);
//!
//! // Missing fields are reported instead of defaulted
//! let incomplete = GraphOptions::builder().with_format(GraphFormat::Dot).build();
//! assert!(incomplete.is_err());
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod graph;

pub use check::CheckConfig;
pub use graph::GraphOptions;

use crate::error::DeadlockLensError;

pub(crate) fn missing_field(field: &str) -> DeadlockLensError {
    DeadlockLensError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}
