//! JUnit XML format report generation

use std::fmt::Write;

use super::{ReportGenerator, deadlocked_count};
use crate::analyzer::SnapshotAnalysis;
use crate::detector::Detection;
use crate::error::DeadlockLensError;
use crate::utils::string::escape_xml;

pub struct JunitReportGenerator;

impl Default for JunitReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JunitReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JunitReportGenerator {
    fn generate_report(&self, analyses: &[SnapshotAnalysis]) -> Result<String, DeadlockLensError> {
        let mut output = String::new();
        let failures = deadlocked_count(analyses);

        writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            output,
            r#"<testsuites name="deadlock-lens" tests="{}" failures="{failures}">"#,
            analyses.len()
        )?;
        writeln!(
            output,
            r#"  <testsuite name="wait-for-snapshots" tests="{}" failures="{failures}">"#,
            analyses.len()
        )?;

        for analysis in analyses {
            let name = escape_xml(analysis.source());
            match analysis.detection() {
                Detection::NoDeadlock => {
                    writeln!(
                        output,
                        r#"    <testcase name="{name}" classname="deadlock-lens" />"#
                    )?;
                }
                Detection::Deadlock(cycle) => {
                    writeln!(
                        output,
                        r#"    <testcase name="{name}" classname="deadlock-lens">"#
                    )?;
                    writeln!(
                        output,
                        r#"      <failure message="Deadlock detected: {}">"#,
                        escape_xml(&cycle.ring())
                    )?;
                    for edge in cycle.edges() {
                        writeln!(
                            output,
                            "{}",
                            escape_xml(&format!(
                                "{} waits for {} (line {})",
                                edge.waiter(),
                                edge.holder(),
                                edge.line()
                            ))
                        )?;
                    }
                    writeln!(output, r#"      </failure>"#)?;
                    writeln!(output, r#"    </testcase>"#)?;
                }
            }
        }

        writeln!(output, r#"  </testsuite>"#)?;
        writeln!(output, r#"</testsuites>"#)?;

        Ok(output)
    }
}
