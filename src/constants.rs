//! Configuration constants for deadlock-lens
//!
//! This module contains the constants used throughout the application.
//! Command defaults can be overridden through flags or environment variables.

use std::time::Duration;

/// Wait-for statement syntax
pub mod syntax {
    /// Separator between waiter and holder
    pub const ARROW: &str = "->";

    /// Lines starting with this are ignored
    pub const COMMENT_PREFIX: char = '#';
}

/// Snapshot discovery
pub mod input {
    /// Name used for snapshots read from standard input
    pub const STDIN_NAME: &str = "<stdin>";

    /// Path argument that selects standard input
    pub const STDIN_ARG: &str = "-";

    /// File extensions picked up when scanning directories
    pub const SNAPSHOT_EXTENSIONS: &[&str] = &["wfg", "txt", "json"];

    /// Extension that selects structured records in auto mode
    pub const JSON_EXTENSION: &str = "json";

    /// Directories never scanned for snapshots
    pub const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules"];
}

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Fewest snapshots that get a progress bar
    pub const MIN_SNAPSHOTS_FOR_BAR: usize = 2;
}

/// Output formatting configuration
pub mod output {
    /// Default report format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default graph format when not specified
    pub const DEFAULT_GRAPH_FORMAT: &str = "ascii";
}
