//! Check command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::analyzer::{SnapshotAnalysis, SnapshotAnalyzer};
use crate::cli::OutputFormat;
use crate::config::CheckConfig;
use crate::error::DeadlockLensError;
use crate::executors::CommandExecutor;
use crate::progress::ProgressReporter;
use crate::reports::{
    GitHubReportGenerator, HumanReportGenerator, JsonReportGenerator, JunitReportGenerator,
    ReportGenerator, deadlocked_count,
};

pub struct CheckExecutor;

impl CheckExecutor {
    /// Render `analyses` in the requested report format
    pub fn report(
        format: OutputFormat,
        analyses: &[SnapshotAnalysis],
    ) -> Result<String, DeadlockLensError> {
        match format {
            OutputFormat::Human => HumanReportGenerator::default().generate_report(analyses),
            OutputFormat::Json => JsonReportGenerator::new().generate_report(analyses),
            OutputFormat::Junit => JunitReportGenerator::new().generate_report(analyses),
            OutputFormat::GitHub => GitHubReportGenerator::new().generate_report(analyses),
        }
    }
}

impl CommandExecutor for CheckExecutor {
    type Config = CheckConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.quiet {
            eprintln!(
                "{} Checking wait-for snapshots for deadlocks...\n",
                style("🔒").cyan()
            );
        }

        let analyzer = SnapshotAnalyzer::new(config.input_format).with_quiet(config.quiet);
        let sources = analyzer
            .discover(&config.inputs)
            .wrap_err("Failed to discover snapshots")?;

        if sources.is_empty() {
            return Err(DeadlockLensError::ConfigurationError {
                message: "No snapshots found in the given inputs".to_string(),
            }
            .into());
        }

        // Progress only when we're in an interactive terminal
        let mut progress = if config.quiet {
            None
        } else {
            ProgressReporter::for_stderr()
        };

        if let Some(p) = progress.as_mut() {
            p.start_loading(sources.len());
        }

        let analyses = match analyzer.analyze_all(&sources, progress.as_ref()) {
            Ok(analyses) => analyses,
            Err(e) => {
                if let Some(p) = progress.as_mut() {
                    p.clear();
                }
                return Err(e.into());
            }
        };

        if let Some(p) = progress.as_mut() {
            p.finish_loading(deadlocked_count(&analyses), analyses.len());
        }

        let report = Self::report(config.format, &analyses)
            .into_diagnostic()
            .wrap_err("Failed to generate report")?;
        print!("{report}");

        // Exit with error code if a deadlock was found and requested
        if config.error_on_deadlock && deadlocked_count(&analyses) > 0 {
            std::process::exit(1);
        }

        Ok(())
    }
}
