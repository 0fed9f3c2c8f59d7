//! Graph command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::analyzer::SnapshotAnalyzer;
use crate::cli::GraphFormat;
use crate::config::GraphOptions;
use crate::executors::CommandExecutor;
use crate::graph::GraphRenderer;

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.quiet {
            eprintln!(
                "{} Generating {} wait-for graph for {}...",
                style("📊").cyan(),
                format!("{:?}", config.format).to_lowercase(),
                style(&config.input).bold()
            );
        }

        let analyzer = SnapshotAnalyzer::new(config.input_format).with_quiet(config.quiet);
        let analysis = analyzer.analyze_source(&config.input)?;

        let renderer = GraphRenderer::new(config.highlight_deadlock);

        // Determine output destination
        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };

        let graph = analysis.graph();
        let detection = analysis.detection();
        match config.format {
            GraphFormat::Ascii => renderer
                .render_ascii(graph, detection, output_writer.as_mut())
                .wrap_err("Failed to render ASCII graph")?,
            GraphFormat::Mermaid => renderer
                .render_mermaid(graph, detection, output_writer.as_mut())
                .wrap_err("Failed to render Mermaid graph")?,
            GraphFormat::Dot => renderer
                .render_dot(graph, detection, output_writer.as_mut())
                .wrap_err("Failed to render DOT graph")?,
        }

        output_writer
            .flush()
            .into_diagnostic()
            .wrap_err("Failed to write graph")?;

        if !config.quiet {
            if let Some(cycle) = detection.cycle() {
                eprintln!(
                    "{} Deadlock: {}",
                    style("⚠").yellow().bold(),
                    style(cycle.ring()).red()
                );
            }
            if let Some(output_path) = config.output {
                eprintln!(
                    "{} Graph written to {}",
                    style("✓").green(),
                    style(output_path.display()).bold()
                );
            }
        }

        Ok(())
    }
}
