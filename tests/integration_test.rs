//! Integration tests for deadlock-lens using the library interface

use std::fs;
use std::path::Path;

use deadlock_lens::analyzer::SnapshotAnalyzer;
use deadlock_lens::cli::{InputFormat, OutputFormat};
use deadlock_lens::common::InputSource;
use deadlock_lens::error::{DeadlockLensError, ParseErrorKind};
use deadlock_lens::executors::check::CheckExecutor;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Snapshot files as (relative path, contents)
type SnapshotDefinition<'a> = (&'a str, &'a str);

fn write_snapshots(root: &Path, snapshots: &[SnapshotDefinition]) {
    for (path, contents) in snapshots {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// A directory of snapshots taken from a database's lock manager
fn create_snapshot_dir(temp_dir: &TempDir) {
    write_snapshots(
        temp_dir.path(),
        &[
            (
                "01-classic.wfg",
                "# three-way deadlock with a bystander\n\
                 P1 -> P2\n\
                 P2 -> P3\n\
                 P3 -> P1\n\
                 P4 -> P1\n",
            ),
            ("02-chain.txt", "A B\nB C\n"),
            (
                "nested/03-records.json",
                r#"[
                    {"waiter": "txn-7", "holder": "txn-9"},
                    {"waiter": "txn-9", "holder": "txn-7"}
                ]"#,
            ),
            ("nested/notes.md", "not a snapshot"),
            ("target/ignored.wfg", "X -> X\n"),
        ],
    );
}

fn analyze_dir(temp_dir: &TempDir) -> Vec<deadlock_lens::analyzer::SnapshotAnalysis> {
    let analyzer = SnapshotAnalyzer::new(InputFormat::Auto).with_quiet(true);
    let sources = analyzer
        .discover(&[InputSource::File(temp_dir.path().to_path_buf())])
        .unwrap();
    analyzer.analyze_all(&sources, None).unwrap()
}

#[test]
fn test_directory_of_snapshots() {
    let temp_dir = TempDir::new().unwrap();
    create_snapshot_dir(&temp_dir);

    let analyses = analyze_dir(&temp_dir);
    let sources: Vec<_> = analyses
        .iter()
        .map(|a| {
            Path::new(a.source())
                .strip_prefix(temp_dir.path())
                .unwrap()
                .display()
                .to_string()
        })
        .collect();

    // Sorted, filtered, and the target directory skipped
    assert_eq!(
        sources,
        vec!["01-classic.wfg", "02-chain.txt", "nested/03-records.json"]
    );

    let classic = analyses[0].detection().cycle().unwrap();
    assert_eq!(classic.nodes(), ["P1", "P2", "P3"]);

    assert!(!analyses[1].is_deadlocked());
    assert_eq!(analyses[1].format(), InputFormat::Text);

    assert_eq!(analyses[2].format(), InputFormat::Json);
    assert_eq!(
        analyses[2].detection().cycle().unwrap().ring(),
        "txn-7 -> txn-9 -> txn-7"
    );
}

#[test]
fn test_json_report_for_directory() {
    let temp_dir = TempDir::new().unwrap();
    create_snapshot_dir(&temp_dir);

    let analyses = analyze_dir(&temp_dir);
    let report = CheckExecutor::report(OutputFormat::Json, &analyses).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["deadlocked"], 2);
    assert_eq!(value["snapshot_count"], 3);
    assert_eq!(value["snapshots"][0]["cycle"], json!(["P1", "P2", "P3"]));
    assert_eq!(value["snapshots"][1]["deadlock"], false);
    assert_eq!(
        value["snapshots"][2]["edges"],
        json!([
            {"waiter": "txn-7", "holder": "txn-9", "line": 1},
            {"waiter": "txn-9", "holder": "txn-7", "line": 2},
        ])
    );
}

#[test]
fn test_github_report_points_at_files() {
    let temp_dir = TempDir::new().unwrap();
    create_snapshot_dir(&temp_dir);

    let analyses = analyze_dir(&temp_dir);
    let report = CheckExecutor::report(OutputFormat::GitHub, &analyses).unwrap();

    let classic = temp_dir.path().join("01-classic.wfg");
    assert!(report.contains(&format!(
        "::error file={},line=2,title=Deadlock::",
        classic.display()
    )));
    assert!(report.contains("2 of 3 snapshots deadlocked"));
}

#[test]
fn test_each_report_format_renders() {
    let temp_dir = TempDir::new().unwrap();
    create_snapshot_dir(&temp_dir);
    let analyses = analyze_dir(&temp_dir);

    for format in [
        OutputFormat::Human,
        OutputFormat::Json,
        OutputFormat::Junit,
        OutputFormat::GitHub,
    ] {
        let report = CheckExecutor::report(format, &analyses).unwrap();
        assert!(!report.is_empty(), "{format:?} report should not be empty");
    }
}

#[test]
fn test_parse_error_names_file_and_line() {
    let temp_dir = TempDir::new().unwrap();
    write_snapshots(
        temp_dir.path(),
        &[
            ("a.wfg", "P1 -> P2\n"),
            ("b.wfg", "# header\n\nP1 P2 P3\nP2 -> P1\n"),
            ("c.wfg", "-> P1\n"),
        ],
    );

    let analyzer = SnapshotAnalyzer::new(InputFormat::Auto).with_quiet(true);
    let sources = analyzer
        .discover(&[InputSource::File(temp_dir.path().to_path_buf())])
        .unwrap();
    let err = analyzer.analyze_all(&sources, None).unwrap_err();

    // b.wfg fails first in input order, even though c.wfg also fails
    match err {
        DeadlockLensError::Parse(err) => {
            assert!(err.name.ends_with("b.wfg"));
            assert_eq!(err.source.kind, ParseErrorKind::WhitespaceInIdentifier);
            assert_eq!(err.source.line_number, 3);
            assert_eq!(err.source.raw_text, "P1 P2 P3");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_explicit_text_format_overrides_extension() {
    let temp_dir = TempDir::new().unwrap();
    write_snapshots(temp_dir.path(), &[("locks.json", "A -> B\nB -> A\n")]);

    let source = InputSource::File(temp_dir.path().join("locks.json"));

    let auto = SnapshotAnalyzer::new(InputFormat::Auto).analyze_source(&source);
    assert!(matches!(
        auto,
        Err(DeadlockLensError::InvalidRecords { .. })
    ));

    let text = SnapshotAnalyzer::new(InputFormat::Text)
        .analyze_source(&source)
        .unwrap();
    assert!(text.is_deadlocked());
}
