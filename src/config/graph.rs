//! Graph command configuration

use std::path::PathBuf;

use super::missing_field;
use crate::cli::{GraphFormat, InputFormat};
use crate::common::InputSource;
use crate::error::DeadlockLensError;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub input: InputSource,
    pub input_format: InputFormat,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
    pub highlight_deadlock: bool,
    pub quiet: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    input: Option<InputSource>,
    input_format: Option<InputFormat>,
    format: Option<GraphFormat>,
    output: Option<Option<PathBuf>>,
    highlight_deadlock: Option<bool>,
    quiet: Option<bool>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: InputSource) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_input_format(mut self, input_format: InputFormat) -> Self {
        self.input_format = Some(input_format);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_highlight_deadlock(mut self, highlight_deadlock: bool) -> Self {
        self.highlight_deadlock = Some(highlight_deadlock);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, DeadlockLensError> {
        Ok(GraphOptions {
            input: self.input.ok_or_else(|| missing_field("input"))?,
            input_format: self
                .input_format
                .ok_or_else(|| missing_field("input_format"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            output: self.output.ok_or_else(|| missing_field("output"))?,
            highlight_deadlock: self
                .highlight_deadlock
                .ok_or_else(|| missing_field("highlight_deadlock"))?,
            quiet: self.quiet.ok_or_else(|| missing_field("quiet"))?,
        })
    }
}
