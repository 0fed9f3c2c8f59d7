//! GitHub Actions format report generation

use std::fmt::Write;

use super::{ReportGenerator, deadlocked_count};
use crate::analyzer::SnapshotAnalysis;
use crate::error::DeadlockLensError;
use crate::utils::string::pluralize;

pub struct GitHubReportGenerator;

impl Default for GitHubReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for GitHubReportGenerator {
    fn generate_report(&self, analyses: &[SnapshotAnalysis]) -> Result<String, DeadlockLensError> {
        let mut output = String::new();

        let deadlocked = deadlocked_count(analyses);
        if deadlocked == 0 {
            writeln!(
                output,
                "::notice title=Deadlock Check::No deadlocks detected in {} {} ✅",
                analyses.len(),
                pluralize("snapshot", analyses.len())
            )?;
            return Ok(output);
        }

        for analysis in analyses {
            let Some(cycle) = analysis.detection().cycle() else {
                continue;
            };

            // Point at the line declaring the ring's first edge
            let line = cycle.edges().first().map_or(1, |edge| edge.line());
            match analysis.path() {
                Some(path) => write!(
                    output,
                    "::error file={},line={line},",
                    escape_property(path)
                )?,
                None => write!(output, "::error ")?,
            }
            writeln!(
                output,
                "title=Deadlock::{}",
                escape_data(&format!("{}: {}", analysis.source(), cycle.ring()))
            )?;
        }

        writeln!(
            output,
            "::error title=Deadlock Check::{} of {} {} deadlocked",
            deadlocked,
            analyses.len(),
            pluralize("snapshot", analyses.len())
        )?;

        Ok(output)
    }
}

/// Workflow command message escaping
fn escape_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Workflow command property escaping
fn escape_property(text: &str) -> String {
    escape_data(text).replace(':', "%3A").replace(',', "%2C")
}
