//! Core graph types
//!
//! This module contains the data structures of the wait-for graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

/// A process, thread, or other lock holder taking part in wait-for relations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessNode {
    name: String,
}

impl ProcessNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A wait-for edge: the source process is blocked waiting for the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitEdge {
    line: usize,
}

impl WaitEdge {
    pub fn new(line: usize) -> Self {
        Self { line }
    }

    /// 1-based line (or record) number where the relation was first declared
    pub fn line(&self) -> usize {
        self.line
    }
}

/// One structured wait-for record: `waiter` is blocked waiting for `holder`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub waiter: String,
    pub holder: String,
}

impl Relation {
    pub fn new(waiter: impl Into<String>, holder: impl Into<String>) -> Self {
        Self {
            waiter: waiter.into(),
            holder: holder.into(),
        }
    }
}

/// An immutable wait-for graph
///
/// Nodes are stored in order of first appearance and each node's holders are
/// kept in declaration order without duplicates. Instances are produced by
/// [`WaitForGraphBuilder`](super::WaitForGraphBuilder).
#[derive(Debug, Clone, Default)]
pub struct WaitForGraph {
    pub(super) graph: DiGraph<ProcessNode, WaitEdge>,
    pub(super) indices: HashMap<String, NodeIndex>,
}

impl WaitForGraph {
    /// The underlying petgraph structure
    pub fn graph(&self) -> &DiGraph<ProcessNode, WaitEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.indices.get(name).copied()
    }

    pub fn name(&self, index: NodeIndex) -> &str {
        self.graph[index].name()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Every node, waiters and holders alike, sorted by name
    pub fn nodes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.graph.node_weights().map(|n| n.name()).collect();
        names.sort_unstable();
        names
    }

    /// Node indices sorted by name; this is the detector's root order
    pub fn sorted_indices(&self) -> Vec<NodeIndex> {
        let mut indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        indices.sort_by(|a, b| self.graph[*a].name().cmp(self.graph[*b].name()));
        indices
    }

    /// Holders `index` waits for, in declaration order
    pub fn successor_indices(&self, index: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields the most recently added edge first
        let mut successors: Vec<NodeIndex> = self.graph.neighbors(index).collect();
        successors.reverse();
        successors
    }

    /// Holders `name` waits for, in declaration order
    pub fn successors(&self, name: &str) -> Vec<&str> {
        self.index_of(name)
            .map(|index| {
                self.successor_indices(index)
                    .into_iter()
                    .map(|s| self.name(s))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The edge `waiter -> holder`, if declared
    pub fn edge(&self, waiter: &str, holder: &str) -> Option<&WaitEdge> {
        let from = self.index_of(waiter)?;
        let to = self.index_of(holder)?;
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    pub fn has_edge(&self, waiter: &str, holder: &str) -> bool {
        self.edge(waiter, holder).is_some()
    }

    /// All relations, grouped by waiter in node order, holders in declaration
    /// order
    pub fn relations(&self) -> Vec<Relation> {
        self.graph
            .node_indices()
            .flat_map(|from| {
                self.successor_indices(from)
                    .into_iter()
                    .map(move |to| Relation::new(self.name(from), self.name(to)))
            })
            .collect()
    }
}
