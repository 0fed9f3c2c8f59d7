use std::io::Read;
use std::path::Path;

use console::style;
use rayon::prelude::*;

use crate::cli::InputFormat;
use crate::common::InputSource;
use crate::constants::input::JSON_EXTENSION;
use crate::detector::{DeadlockDetector, Detection};
use crate::error::{DeadlockLensError, InputParseError};
use crate::graph::{Relation, WaitForGraph, WaitForGraphBuilder};
use crate::input_discovery::InputDiscovery;
use crate::progress::ProgressReporter;

/// The raw contents of one snapshot
#[derive(Debug, Clone)]
pub struct Snapshot {
    name: String,
    path: Option<String>,
    format: InputFormat,
    text: String,
}

impl Snapshot {
    /// Wrap text that did not come from a file
    pub fn from_text(
        name: impl Into<String>,
        format: InputFormat,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: None,
            format,
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The graph and detection result of one snapshot
#[derive(Debug, Clone)]
pub struct SnapshotAnalysis {
    source: String,
    path: Option<String>,
    format: InputFormat,
    graph: WaitForGraph,
    detection: Detection,
}

impl SnapshotAnalysis {
    /// Snapshot name as shown in reports
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File path, when the snapshot came from a file
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The resolved format, never [`InputFormat::Auto`]
    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn graph(&self) -> &WaitForGraph {
        &self.graph
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    pub fn is_deadlocked(&self) -> bool {
        self.detection.is_deadlock()
    }
}

/// Loads wait-for snapshots and runs deadlock detection on each
///
/// Every snapshot gets its own graph and detector pass; nothing is shared
/// between snapshots, so they are analyzed in parallel.
#[derive(Debug, Clone)]
pub struct SnapshotAnalyzer {
    input_format: InputFormat,
    detector: DeadlockDetector,
    quiet: bool,
}

impl SnapshotAnalyzer {
    pub fn new(input_format: InputFormat) -> Self {
        Self {
            input_format,
            detector: DeadlockDetector::new(),
            quiet: false,
        }
    }

    /// Suppress warnings on stderr
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Expand directories and drop missing paths
    pub fn discover(&self, inputs: &[InputSource]) -> Result<Vec<InputSource>, DeadlockLensError> {
        let mut discovery = InputDiscovery::new();
        let sources = discovery.discover_all(inputs)?;

        if !self.quiet {
            for warning in discovery.warnings() {
                eprintln!("{} {}", style("⚠").yellow(), warning);
            }
        }

        Ok(sources)
    }

    /// Format to use for `source`, resolving [`InputFormat::Auto`]
    pub fn resolve_format(&self, source: &InputSource) -> InputFormat {
        match self.input_format {
            InputFormat::Auto => match source.path() {
                Some(path) if has_json_extension(path) => InputFormat::Json,
                _ => InputFormat::Text,
            },
            explicit => explicit,
        }
    }

    /// Read a snapshot's contents
    pub fn load(&self, source: &InputSource) -> Result<Snapshot, DeadlockLensError> {
        let text = match source {
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| DeadlockLensError::FileReadError {
                    path: path.clone(),
                    source: e,
                })?
            }
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| DeadlockLensError::StdinReadError { source: e })?;
                text
            }
        };

        Ok(Snapshot {
            name: source.name(),
            path: source.path().map(|p| p.display().to_string()),
            format: self.resolve_format(source),
            text,
        })
    }

    /// Build the graph of `snapshot`, failing on its first invalid relation
    pub fn build_graph(&self, snapshot: &Snapshot) -> Result<WaitForGraph, DeadlockLensError> {
        let builder = WaitForGraphBuilder::new();
        let result = match snapshot.format {
            InputFormat::Json => {
                let relations: Vec<Relation> = serde_json::from_str(&snapshot.text).map_err(
                    |source| DeadlockLensError::InvalidRecords {
                        name: snapshot.name.clone(),
                        source,
                    },
                )?;
                builder.add_relations(&relations)
            }
            InputFormat::Text | InputFormat::Auto => builder.parse_str(&snapshot.text),
        };

        let highlight_line = snapshot.format != InputFormat::Json;
        result.map(WaitForGraphBuilder::build).map_err(|e| {
            InputParseError::new(&snapshot.name, &snapshot.text, e, highlight_line).into()
        })
    }

    /// Build and check one snapshot
    pub fn analyze_snapshot(
        &self,
        snapshot: Snapshot,
    ) -> Result<SnapshotAnalysis, DeadlockLensError> {
        let graph = self.build_graph(&snapshot)?;
        let detection = self.detector.detect(&graph);

        Ok(SnapshotAnalysis {
            source: snapshot.name,
            path: snapshot.path,
            format: snapshot.format,
            graph,
            detection,
        })
    }

    /// Load and check one source
    pub fn analyze_source(
        &self,
        source: &InputSource,
    ) -> Result<SnapshotAnalysis, DeadlockLensError> {
        let snapshot = self.load(source)?;
        self.analyze_snapshot(snapshot)
    }

    /// Load and check every source in parallel
    ///
    /// Results keep input order. On failure, the error of the first failing
    /// source in input order is returned.
    pub fn analyze_all(
        &self,
        sources: &[InputSource],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<SnapshotAnalysis>, DeadlockLensError> {
        let results: Vec<Result<SnapshotAnalysis, DeadlockLensError>> = sources
            .par_iter()
            .map(|source| {
                let result = self.analyze_source(source);
                if let Some(p) = progress {
                    p.snapshot_analyzed(&source.name());
                }
                result
            })
            .collect();

        results.into_iter().collect()
    }
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_resolve_format_auto() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);

        let json = InputSource::File(PathBuf::from("locks.JSON"));
        let text = InputSource::File(PathBuf::from("locks.wfg"));
        assert_eq!(analyzer.resolve_format(&json), InputFormat::Json);
        assert_eq!(analyzer.resolve_format(&text), InputFormat::Text);
        assert_eq!(analyzer.resolve_format(&InputSource::Stdin), InputFormat::Text);
    }

    #[test]
    fn test_resolve_format_explicit() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Text);
        let json = InputSource::File(PathBuf::from("locks.json"));
        assert_eq!(analyzer.resolve_format(&json), InputFormat::Text);
    }

    #[test]
    fn test_analyze_text_snapshot() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);
        let snapshot = Snapshot::from_text("inline", InputFormat::Text, "A -> B\nB -> A\n");

        let analysis = analyzer.analyze_snapshot(snapshot).unwrap();
        assert_eq!(analysis.source(), "inline");
        assert!(analysis.path().is_none());
        assert!(analysis.is_deadlocked());
        assert_eq!(analysis.graph().edge_count(), 2);
    }

    #[test]
    fn test_analyze_json_snapshot() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);
        let snapshot = Snapshot::from_text(
            "records",
            InputFormat::Json,
            r#"[{"waiter": "T1", "holder": "T2"}, {"waiter": "T2", "holder": "T3"}]"#,
        );

        let analysis = analyzer.analyze_snapshot(snapshot).unwrap();
        assert!(!analysis.is_deadlocked());
        assert_eq!(analysis.graph().nodes(), vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn test_invalid_json_records() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Json);
        let snapshot = Snapshot::from_text("records", InputFormat::Json, r#"{"waiter": "T1"}"#);

        let err = analyzer.analyze_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, DeadlockLensError::InvalidRecords { .. }));
    }

    #[test]
    fn test_parse_error_carries_source() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Text);
        let snapshot = Snapshot::from_text("bad", InputFormat::Text, "A -> B\nP1 P2 P3\n");

        match analyzer.analyze_snapshot(snapshot).unwrap_err() {
            DeadlockLensError::Parse(err) => {
                assert_eq!(err.name, "bad");
                assert_eq!(err.source.kind, ParseErrorKind::WhitespaceInIdentifier);
                assert_eq!(err.source.line_number, 2);
                assert!(err.span.is_some());
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_analyze_all_keeps_order_and_first_error() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.wfg");
        let b = temp.path().join("b.wfg");
        let c = temp.path().join("c.wfg");
        fs::write(&a, "P1 -> P1\n").unwrap();
        fs::write(&b, "broken\n").unwrap();
        fs::write(&c, "also broken\nP1\n").unwrap();

        let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);
        let ok = analyzer
            .analyze_all(&[InputSource::File(a.clone())], None)
            .unwrap();
        assert_eq!(ok.len(), 1);
        assert!(ok[0].is_deadlocked());
        assert_eq!(ok[0].path(), Some(a.display().to_string().as_str()));

        let err = analyzer
            .analyze_all(
                &[
                    InputSource::File(a),
                    InputSource::File(b.clone()),
                    InputSource::File(c),
                ],
                None,
            )
            .unwrap_err();
        match err {
            DeadlockLensError::Parse(err) => assert_eq!(err.name, b.display().to_string()),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);
        let err = analyzer
            .analyze_source(&InputSource::File(PathBuf::from("/nonexistent/locks.wfg")))
            .unwrap_err();
        assert!(matches!(err, DeadlockLensError::FileReadError { .. }));
    }
}
