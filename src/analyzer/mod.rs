//! # Snapshot Analysis Module
//!
//! This module loads wait-for snapshots and runs deadlock detection over each
//! of them. A snapshot is one frozen set of relations: a text file, a JSON
//! record file, or stdin.
//!
//! ## Key Components
//!
//! - **SnapshotAnalyzer**: Discovers, loads, parses, and checks snapshots,
//!   several at a time
//! - **Snapshot**: The raw contents of one snapshot
//! - **SnapshotAnalysis**: One snapshot's graph and detection result
//!
//! ## Example
//!
//! ```
//! use deadlock_lens::analyzer::{Snapshot, SnapshotAnalyzer};
//! use deadlock_lens::cli::InputFormat;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = SnapshotAnalyzer::new(InputFormat::Auto);
//!
//! let snapshot = Snapshot::from_text(
//!     "lock-table",
//!     InputFormat::Text,
//!     "writer -> reader\nreader -> compactor\ncompactor -> writer\n",
//! );
//! let analysis = analyzer.analyze_snapshot(snapshot)?;
//!
//! assert!(analysis.is_deadlocked());
//! let cycle = analysis.detection().cycle().expect("three-way deadlock");
//! assert_eq!(cycle.ring(), "compactor -> writer -> reader -> compactor");
//! # Ok(())
//! # }
//! ```

mod analyzer_impl;

pub use analyzer_impl::{Snapshot, SnapshotAnalysis, SnapshotAnalyzer};
