//! # Deadlock Lens - Detect Deadlocks in Wait-For Graphs
//!
//! Deadlock Lens reads wait-for relations between processes (`P1 -> P2`
//! means P1 is blocked waiting for P2), builds a wait-for graph, and searches
//! it for a cycle. A cycle means every process on it waits for the next, so
//! none can make progress: a deadlock.
//!
//! ## Main Components
//!
//! - **Graph**: Parses relation statements into a validated wait-for graph
//! - **Detector**: Three-color depth-first search returning one concrete
//!   cycle as evidence
//! - **Analyzer**: Loads snapshot files and analyzes many of them in parallel
//! - **Reports**: Generates human-readable and machine-readable reports
//!
//! ## Usage
//!
//! ### Example: Checking a Snapshot
//!
//! ```
//! use deadlock_lens::detector::DeadlockDetector;
//! use deadlock_lens::graph::WaitForGraphBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = "\
//! ## lock table at 12:04:31
//! P1 -> P2
//! P2 -> P3
//! P3 -> P1
//! P4 -> P1
//! ";
//!
//! let graph = WaitForGraphBuilder::new().parse_str(snapshot)?.build();
//! let detection = DeadlockDetector::new().detect(&graph);
//!
//! let cycle = detection.cycle().expect("P1, P2 and P3 wait on each other");
//! assert_eq!(cycle.nodes(), ["P1", "P2", "P3"]);
//! assert_eq!(cycle.ring(), "P1 -> P2 -> P3 -> P1");
//!
//! // The consumer contract: {"deadlock": true, "cycle": [...]}
//! assert_eq!(
//!     serde_json::to_string(&detection)?,
//!     r#"{"deadlock":true,"cycle":["P1","P2","P3"]}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Reporting on Snapshot Files
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use deadlock_lens::analyzer::SnapshotAnalyzer;
//! use deadlock_lens::cli::InputFormat;
//! use deadlock_lens::common::InputSource;
//! use deadlock_lens::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);
//!
//! // Directories are scanned for .wfg, .txt and .json snapshots
//! let sources = analyzer.discover(&[InputSource::File(PathBuf::from("snapshots/"))])?;
//! let analyses = analyzer.analyze_all(&sources, None)?;
//!
//! println!("{}", HumanReportGenerator::default().generate_report(&analyses)?);
//!
//! let json = JsonReportGenerator::new().generate_report(&analyses)?;
//! std::fs::write("deadlocks.json", json).map_err(deadlock_lens::error::DeadlockLensError::from)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Visualizing the Wait-For Graph
//!
//! ```
//! use deadlock_lens::detector::DeadlockDetector;
//! use deadlock_lens::graph::{GraphRenderer, WaitForGraphBuilder};
//!
//! # fn main() -> miette::Result<()> {
//! let graph = WaitForGraphBuilder::new()
//!     .parse_str("writer -> reader\nreader -> writer\n")?
//!     .build();
//! let detection = DeadlockDetector::new().detect(&graph);
//!
//! // Mermaid diagram with the deadlock ring highlighted
//! let mut mermaid = Vec::new();
//! GraphRenderer::new(true).render_mermaid(&graph, &detection, &mut mermaid)?;
//!
//! let mermaid = String::from_utf8_lossy(&mermaid);
//! assert!(mermaid.starts_with("graph LR"));
//! assert!(mermaid.contains("Deadlock: reader -> writer -> reader"));
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod input_discovery;
mod progress;
mod utils;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod reports;

// Re-export commonly used traits
pub use common::{ConfigBuilder, FromCommand};

use crate::detector::{DeadlockDetector, Detection};
use crate::error::ParseError;
use crate::graph::WaitForGraphBuilder;

/// Parse relation statements and check them for a deadlock in one call
///
/// ```
/// use deadlock_lens::error::ParseErrorKind;
///
/// let detection = deadlock_lens::detect_deadlock("A -> B\nB -> C\n").unwrap();
/// assert!(!detection.is_deadlock());
///
/// let err = deadlock_lens::detect_deadlock("P1 P2 P3").unwrap_err();
/// assert_eq!(err.kind, ParseErrorKind::WhitespaceInIdentifier);
/// assert_eq!(err.line_number, 1);
/// ```
pub fn detect_deadlock(text: &str) -> Result<Detection, ParseError> {
    let graph = WaitForGraphBuilder::new().parse_str(text)?.build();
    Ok(DeadlockDetector::new().detect(&graph))
}

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
