//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - junit: JUnit XML format for CI/CD integration
//! - github: GitHub Actions workflow annotations

pub mod github;
pub mod human;
pub mod json;
pub mod junit;

use crate::analyzer::SnapshotAnalysis;
use crate::error::DeadlockLensError;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from the analyses of one or more snapshots
    fn generate_report(&self, analyses: &[SnapshotAnalysis]) -> Result<String, DeadlockLensError>;
}

/// Number of deadlocked snapshots
pub fn deadlocked_count(analyses: &[SnapshotAnalysis]) -> usize {
    analyses.iter().filter(|a| a.is_deadlocked()).count()
}

// Re-export for convenience
pub use github::GitHubReportGenerator;
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
pub use junit::JunitReportGenerator;
