//! # Deadlock Detection Module
//!
//! This module searches wait-for graphs for cycles. A cycle, including a
//! process waiting on itself, means every process on it is blocked forever.
//!
//! ## Algorithm
//!
//! A three-color depth-first search. Each node starts `Unvisited`, becomes
//! `OnStack` while it is on the active path, and ends `Done` once all of its
//! holders have been explored without closing a cycle. Meeting an `OnStack`
//! holder closes a cycle: the path suffix starting at that holder. The search
//! is O(V + E), uses an explicit stack, and stops at the first cycle.
//!
//! Roots are taken in lexicographic order of process name and holders in
//! declaration order, so a graph always yields the same cycle.
//!
//! ## Key Components
//!
//! - **DeadlockDetector**: Runs the search
//! - **Detection**: `Deadlock(cycle)` or `NoDeadlock`
//! - **DeadlockCycle**: The processes in the cycle and the edges closing it
//!
//! ## Example
//!
//! ```
//! use deadlock_lens::detector::{DeadlockDetector, Detection};
//! use deadlock_lens::graph::WaitForGraphBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = WaitForGraphBuilder::new()
//!     .parse_str("P1 -> P2\nP2 -> P3\nP3 -> P1\nP4 -> P1")?
//!     .build();
//!
//! let detection = DeadlockDetector::new().detect(&graph);
//! let cycle = detection.cycle().expect("P1, P2 and P3 wait on each other");
//!
//! assert_eq!(cycle.nodes(), ["P1", "P2", "P3"]);
//! assert_eq!(cycle.ring(), "P1 -> P2 -> P3 -> P1");
//!
//! let graph = WaitForGraphBuilder::new().parse_str("A -> B\nB -> C")?.build();
//! assert_eq!(DeadlockDetector::new().detect(&graph), Detection::NoDeadlock);
//! # Ok(())
//! # }
//! ```

mod detector_impl;

pub use detector_impl::*;
