//! # Wait-For Graph Construction and Rendering Module
//!
//! This module turns wait-for relations into an immutable graph and renders
//! that graph for people to read.
//!
//! ## Components
//!
//! ### Graph Building
//! - **WaitForGraphBuilder**: Parses relation statements (`P1 -> P2` or
//!   `P1 P2`) or structured records into a graph, rejecting malformed input
//! - **WaitForGraph**: The immutable graph; every waiter and holder is a node
//! - **ProcessNode** / **WaitEdge**: Node and edge weights
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Renders graphs as ASCII, Mermaid, or DOT, with the
//!   deadlock ring highlighted
//!
//! ## Example
//!
//! ```
//! use deadlock_lens::graph::WaitForGraphBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = WaitForGraphBuilder::new()
//!     .parse_str("# worker pool\nworker-1 -> worker-2\nworker-2 db-writer")?
//!     .build();
//!
//! assert_eq!(graph.nodes(), vec!["db-writer", "worker-1", "worker-2"]);
//! assert_eq!(graph.successors("worker-1"), vec!["worker-2"]);
//! # Ok(())
//! # }
//! ```

mod builder;
mod renderer;
mod types;

pub use builder::WaitForGraphBuilder;
pub use renderer::GraphRenderer;
pub use types::{ProcessNode, Relation, WaitEdge, WaitForGraph};
