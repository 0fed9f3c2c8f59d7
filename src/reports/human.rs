//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::{ReportGenerator, deadlocked_count};
use crate::analyzer::SnapshotAnalysis;
use crate::detector::Detection;
use crate::error::DeadlockLensError;
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    show_edges: bool,
}

impl Default for HumanReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HumanReportGenerator {
    /// `show_edges` lists every edge of each deadlock ring with the line that
    /// declared it
    pub fn new(show_edges: bool) -> Self {
        Self { show_edges }
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, analyses: &[SnapshotAnalysis]) -> Result<String, DeadlockLensError> {
        let mut output = String::new();

        if analyses.is_empty() {
            writeln!(output, "\n{} No snapshots to analyze.", style("ℹ").blue())?;
            return Ok(output);
        }

        for analysis in analyses {
            let graph = analysis.graph();
            writeln!(
                output,
                "\n{} {} ({} {}, {} wait-for {})",
                style("📄").blue(),
                style(analysis.source()).bold(),
                graph.node_count(),
                pluralize("process", graph.node_count()),
                graph.edge_count(),
                pluralize("relation", graph.edge_count())
            )?;

            match analysis.detection() {
                Detection::NoDeadlock => {
                    writeln!(output, "  {} No deadlock detected.", style("✅").green())?;
                }
                Detection::Deadlock(cycle) => {
                    writeln!(
                        output,
                        "  {} DEADLOCK DETECTED: {} {} waiting on each other",
                        style("❌").red().bold(),
                        style(cycle.len()).red().bold(),
                        pluralize("process", cycle.len())
                    )?;
                    writeln!(
                        output,
                        "  {} Cycle: {}",
                        style("🔄").yellow(),
                        style(cycle.ring()).red()
                    )?;

                    if self.show_edges {
                        for edge in cycle.edges() {
                            writeln!(
                                output,
                                "    {} {} waits for {} {}",
                                style("→").dim(),
                                style(edge.waiter()).yellow(),
                                style(edge.holder()).yellow(),
                                style(format!("(line {})", edge.line())).dim()
                            )?;
                        }
                    }
                }
            }
        }

        let deadlocked = deadlocked_count(analyses);
        if deadlocked == 0 {
            writeln!(
                output,
                "\n{} No deadlocks found in {} {}.",
                style("✅").green().bold(),
                analyses.len(),
                pluralize("snapshot", analyses.len())
            )?;
        } else {
            writeln!(
                output,
                "\n{} {} of {} {} deadlocked.",
                style("❌").red().bold(),
                style(deadlocked).red().bold(),
                analyses.len(),
                pluralize("snapshot", analyses.len())
            )?;
            writeln!(
                output,
                "\n{} To break a deadlock, one process in each cycle must release what it holds \
                 or stop waiting.",
                style("💡").yellow()
            )?;
            writeln!(
                output,
                "{} Acquiring locks in a single global order prevents these cycles.",
                style("💡").yellow()
            )?;
        }

        Ok(output)
    }
}
