//! Check command configuration

use super::missing_field;
use crate::cli::{InputFormat, OutputFormat};
use crate::common::InputSource;
use crate::error::DeadlockLensError;

/// Configuration for the check command
///
/// This struct contains all options for analyzing wait-for snapshots and
/// reporting their deadlocks.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Snapshot files, directories, or stdin
    pub inputs: Vec<InputSource>,
    /// How snapshots are interpreted
    pub input_format: InputFormat,
    /// Output format for the report
    pub format: OutputFormat,
    /// Whether to exit with error code if a deadlock is found
    pub error_on_deadlock: bool,
    /// Suppress status messages
    pub quiet: bool,
}

impl CheckConfig {
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct CheckConfigBuilder {
    inputs: Option<Vec<InputSource>>,
    input_format: Option<InputFormat>,
    format: Option<OutputFormat>,
    error_on_deadlock: Option<bool>,
    quiet: Option<bool>,
}

impl CheckConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(mut self, inputs: Vec<InputSource>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_input_format(mut self, input_format: InputFormat) -> Self {
        self.input_format = Some(input_format);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_error_on_deadlock(mut self, error_on_deadlock: bool) -> Self {
        self.error_on_deadlock = Some(error_on_deadlock);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }
}

impl crate::common::ConfigBuilder for CheckConfigBuilder {
    type Config = CheckConfig;

    fn build(self) -> Result<Self::Config, DeadlockLensError> {
        Ok(CheckConfig {
            inputs: self.inputs.ok_or_else(|| missing_field("inputs"))?,
            input_format: self
                .input_format
                .ok_or_else(|| missing_field("input_format"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            error_on_deadlock: self
                .error_on_deadlock
                .ok_or_else(|| missing_field("error_on_deadlock"))?,
            quiet: self.quiet.ok_or_else(|| missing_field("quiet"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    #[test]
    fn test_builder_reports_first_missing_field() {
        let err = CheckConfig::builder()
            .with_inputs(vec![InputSource::Stdin])
            .build()
            .unwrap_err();

        match err {
            DeadlockLensError::ConfigurationError { message } => {
                assert_eq!(message, "Missing required field: input_format");
            }
            other => panic!("Expected ConfigurationError, got {other:?}"),
        }
    }
}
