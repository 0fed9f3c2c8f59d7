//! JSON format report generation

use serde_json::json;

use super::{ReportGenerator, deadlocked_count};
use crate::analyzer::SnapshotAnalysis;
use crate::error::DeadlockLensError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, analyses: &[SnapshotAnalysis]) -> Result<String, DeadlockLensError> {
        let snapshots: Vec<_> = analyses
            .iter()
            .map(|analysis| {
                let graph = analysis.graph();
                // Flatten the detection so `deadlock` and `cycle` sit next to the counts
                let mut entry = serde_json::to_value(analysis.detection())?;
                entry["source"] = json!(analysis.source());
                entry["node_count"] = json!(graph.node_count());
                entry["edge_count"] = json!(graph.edge_count());

                if let Some(cycle) = analysis.detection().cycle() {
                    entry["edges"] = cycle
                        .edges()
                        .iter()
                        .map(|edge| {
                            json!({
                                "waiter": edge.waiter(),
                                "holder": edge.holder(),
                                "line": edge.line(),
                            })
                        })
                        .collect();
                }

                Ok(entry)
            })
            .collect::<Result<_, serde_json::Error>>()?;

        let report = json!({
            "deadlocked": deadlocked_count(analyses),
            "snapshot_count": analyses.len(),
            "snapshots": snapshots,
        });

        Ok(serde_json::to_string_pretty(&report)?)
    }
}
