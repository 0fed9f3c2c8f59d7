use std::fmt;

use petgraph::graph::NodeIndex;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::constants::syntax::ARROW;
use crate::graph::WaitForGraph;

/// Per-node traversal state, scoped to one detection call
///
/// Transitions are monotonic: `Unvisited -> OnStack -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

/// A node on the active DFS path and the next successor to examine
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeIndex,
    cursor: usize,
}

/// Traversal state owned by a single call to [`DeadlockDetector::detect`]
///
/// Indexed by `NodeIndex::index()`, which petgraph keeps dense.
struct Traversal {
    state: Vec<VisitState>,
    path_position: Vec<usize>,
    successors: Vec<Vec<NodeIndex>>,
    path: Vec<Frame>,
}

impl Traversal {
    fn new(graph: &WaitForGraph) -> Self {
        let node_count = graph.node_count();
        let successors = graph
            .graph()
            .node_indices()
            .map(|index| graph.successor_indices(index))
            .collect();

        Self {
            state: vec![VisitState::Unvisited; node_count],
            path_position: vec![0; node_count],
            successors,
            path: Vec::new(),
        }
    }

    fn push(&mut self, node: NodeIndex) {
        self.state[node.index()] = VisitState::OnStack;
        self.path_position[node.index()] = self.path.len();
        self.path.push(Frame { node, cursor: 0 });
    }

    /// Depth-first search from `root`; returns the path suffix forming the
    /// first cycle met
    fn search_from(&mut self, root: NodeIndex) -> Option<Vec<NodeIndex>> {
        self.push(root);

        while let Some(frame) = self.path.last_mut() {
            let node = frame.node;
            let Some(&next) = self.successors[node.index()].get(frame.cursor) else {
                self.state[node.index()] = VisitState::Done;
                self.path.pop();
                continue;
            };
            frame.cursor += 1;

            match self.state[next.index()] {
                VisitState::Unvisited => self.push(next),
                VisitState::OnStack => {
                    let start = self.path_position[next.index()];
                    return Some(self.path[start..].iter().map(|f| f.node).collect());
                }
                VisitState::Done => {}
            }
        }

        None
    }
}

/// Detector for finding deadlocks in wait-for graphs
///
/// Runs a three-color depth-first search, visiting roots in lexicographic
/// order of process name and successors in declaration order, and stops at
/// the first cycle. The same graph always yields the same cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlockDetector;

impl DeadlockDetector {
    /// Create a new deadlock detector
    pub fn new() -> Self {
        Self
    }

    /// Search `graph` for a wait-for cycle
    ///
    /// Runs in O(V + E) and never mutates the graph.
    pub fn detect(&self, graph: &WaitForGraph) -> Detection {
        let mut traversal = Traversal::new(graph);

        for root in graph.sorted_indices() {
            if traversal.state[root.index()] != VisitState::Unvisited {
                continue;
            }
            if let Some(ring) = traversal.search_from(root) {
                return Detection::Deadlock(DeadlockCycle::from_ring(graph, &ring));
            }
        }

        Detection::NoDeadlock
    }
}

/// Outcome of one detection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Every process in the cycle waits on the next one, and the last waits
    /// on the first
    Deadlock(DeadlockCycle),
    NoDeadlock,
}

impl Detection {
    pub fn is_deadlock(&self) -> bool {
        matches!(self, Detection::Deadlock(_))
    }

    pub fn cycle(&self) -> Option<&DeadlockCycle> {
        match self {
            Detection::Deadlock(cycle) => Some(cycle),
            Detection::NoDeadlock => None,
        }
    }
}

impl Serialize for Detection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Detection::Deadlock(cycle) => {
                let mut state = serializer.serialize_struct("Detection", 2)?;
                state.serialize_field("deadlock", &true)?;
                state.serialize_field("cycle", cycle.nodes())?;
                state.end()
            }
            Detection::NoDeadlock => {
                let mut state = serializer.serialize_struct("Detection", 1)?;
                state.serialize_field("deadlock", &false)?;
                state.end()
            }
        }
    }
}

/// A deadlock certificate: an open sequence of processes read as a ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlockCycle {
    nodes: Vec<String>,
    edges: Vec<CycleEdge>,
}

impl DeadlockCycle {
    fn from_ring(graph: &WaitForGraph, ring: &[NodeIndex]) -> Self {
        let nodes: Vec<String> = ring.iter().map(|&i| graph.name(i).to_string()).collect();

        let edges = ring
            .iter()
            .enumerate()
            .map(|(i, &waiter)| {
                let holder = ring[(i + 1) % ring.len()];
                let line = graph
                    .graph()
                    .find_edge(waiter, holder)
                    .and_then(|e| graph.graph().edge_weight(e))
                    .map(|e| e.line())
                    .unwrap_or_default();
                CycleEdge {
                    waiter: graph.name(waiter).to_string(),
                    holder: graph.name(holder).to_string(),
                    line,
                }
            })
            .collect();

        Self { nodes, edges }
    }

    /// Processes in the cycle, in traversal order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// The closed ring of edges `nodes[i] -> nodes[(i + 1) % len]`
    pub fn edges(&self) -> &[CycleEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A single process waiting on itself
    pub fn is_self_loop(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// Whether `waiter -> holder` is one of the ring's edges
    pub fn contains_edge(&self, waiter: &str, holder: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.waiter == waiter && e.holder == holder)
    }

    /// The ring closed back on its first process, e.g. `P1 -> P2 -> P1`
    pub fn ring(&self) -> String {
        let mut parts: Vec<&str> = self.nodes.iter().map(String::as_str).collect();
        if let Some(first) = self.nodes.first() {
            parts.push(first);
        }
        parts.join(&format!(" {ARROW} "))
    }
}

impl fmt::Display for DeadlockCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ring())
    }
}

/// One wait-for edge of a deadlock ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    pub waiter: String,
    pub holder: String,
    /// Line (or record) number that declared the relation
    pub line: usize,
}

impl CycleEdge {
    pub fn waiter(&self) -> &str {
        &self.waiter
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn line(&self) -> usize {
        self.line
    }
}
