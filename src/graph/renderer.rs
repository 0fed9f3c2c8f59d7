use std::collections::HashMap;
use std::io::Write;

use miette::Result;
use petgraph::graph::NodeIndex;

use crate::detector::{DeadlockCycle, Detection};
use crate::error::DeadlockLensError;
use crate::graph::WaitForGraph;
use crate::utils::string::escape_quoted;

// Blue-Orange Accessible Palette
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const DEADLOCK_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const DEADLOCK_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const DEADLOCK_EDGE: &str = "#FF6500"; // Deep orange
    pub const LEGEND_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DeadlockLensError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DeadlockLensError::from)
    };
}

/// Renders a wait-for graph, marking the deadlock ring when there is one
pub struct GraphRenderer {
    highlight_deadlock: bool,
}

impl GraphRenderer {
    pub fn new(highlight_deadlock: bool) -> Self {
        Self { highlight_deadlock }
    }

    /// The ring to highlight, if highlighting is on and there is a deadlock
    fn ring<'a>(&self, detection: &'a Detection) -> Option<&'a DeadlockCycle> {
        detection.cycle().filter(|_| self.highlight_deadlock)
    }

    pub fn render_ascii(
        &self,
        graph: &WaitForGraph,
        detection: &Detection,
        output: &mut dyn Write,
    ) -> Result<()> {
        if graph.is_empty() {
            writeln_out!(output, "No wait-for relations to visualize")?;
            return Ok(());
        }

        writeln_out!(output, "\n📊 Wait-For Graph\n")?;

        let ring = self.ring(detection);

        for node in graph.sorted_indices() {
            let name = graph.name(node);
            let in_ring = ring.is_some_and(|cycle| cycle.contains(name));

            if in_ring {
                writeln_out!(output, "┌─────────────────────────────────────┐")?;
                writeln_out!(output, "│ {} 🔒 DEADLOCKED", name)?;
                writeln_out!(output, "└─────────────────────────────────────┘")?;
            } else {
                writeln_out!(output, "{}", name)?;
            }

            let holders = graph.successor_indices(node);
            if holders.is_empty() {
                writeln_out!(output, "  └── (not waiting)")?;
            }

            for (i, &holder_idx) in holders.iter().enumerate() {
                let holder = graph.name(holder_idx);
                let prefix = if i == holders.len() - 1 {
                    "└──"
                } else {
                    "├──"
                };
                let line = line_of(graph, name, holder)?;
                let marker = if ring.is_some_and(|cycle| cycle.contains_edge(name, holder)) {
                    " 🔒 [DEADLOCK]"
                } else {
                    ""
                };

                writeln_out!(
                    output,
                    "  {} waits for {} (line {}){}",
                    prefix,
                    holder,
                    line,
                    marker
                )?;
            }

            writeln_out!(output)?; // Empty line between processes
        }

        if let Some(cycle) = ring {
            writeln_out!(output, "🔄 Deadlock: {}", cycle.ring())?;
            writeln_out!(output, "🔒 = Part of the deadlock")?;
        }

        Ok(())
    }

    pub fn render_mermaid(
        &self,
        graph: &WaitForGraph,
        detection: &Detection,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "graph LR")?;

        let ring = self.ring(detection);
        let ids = mermaid_ids(graph);

        writeln_out!(output)?;
        for node in graph.sorted_indices() {
            let name = graph.name(node);
            let id = &ids[&node];
            let label = escape_mermaid(name);

            if ring.is_some_and(|cycle| cycle.contains(name)) {
                writeln_out!(output, "    {}((\"{}\"))", id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:3px",
                    id,
                    colors::DEADLOCK_NODE_FILL,
                    colors::DEADLOCK_NODE_STROKE
                )?;
            } else {
                writeln_out!(output, "    {}[\"{}\"]", id, label)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:2px",
                    id,
                    colors::NORMAL_NODE_FILL,
                    colors::NORMAL_NODE_STROKE
                )?;
            }
        }

        writeln_out!(output)?;

        // Edges in declaration order; linkStyle indices follow that order
        let mut relations = graph.relations();
        relations.sort_by_key(|relation| {
            graph
                .edge(&relation.waiter, &relation.holder)
                .map(|edge| edge.line())
        });

        for (link_index, relation) in relations.iter().enumerate() {
            let waiter = graph_index(graph, &relation.waiter)?;
            let holder = graph_index(graph, &relation.holder)?;
            let line = line_of(graph, &relation.waiter, &relation.holder)?;
            let in_ring =
                ring.is_some_and(|cycle| cycle.contains_edge(&relation.waiter, &relation.holder));

            let (arrow, color, width) = if in_ring {
                ("==>", colors::DEADLOCK_EDGE, 3)
            } else {
                ("-->", colors::NORMAL_EDGE, 2)
            };

            writeln_out!(
                output,
                "    {} {}|line {}| {}",
                ids[&waiter],
                arrow,
                line,
                ids[&holder]
            )?;
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:{}px",
                link_index,
                color,
                width
            )?;
        }

        if let Some(cycle) = ring {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph Legend")?;
            writeln_out!(output, "        L1[Waiting process]")?;
            writeln_out!(output, "        L2((Deadlocked process))")?;
            writeln_out!(
                output,
                "        L3[\"Deadlock: {}\"]",
                escape_mermaid(&cycle.ring())
            )?;
            writeln_out!(
                output,
                "        style L1 fill:{},stroke:{},stroke-width:2px",
                colors::NORMAL_NODE_FILL,
                colors::NORMAL_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style L2 fill:{},stroke:{},stroke-width:3px",
                colors::DEADLOCK_NODE_FILL,
                colors::DEADLOCK_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style Legend fill:{},stroke:#ddd,stroke-width:1px",
                colors::LEGEND_BG
            )?;
            writeln_out!(output, "    end")?;
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        graph: &WaitForGraph,
        detection: &Detection,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph wait_for {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        let ring = self.ring(detection);

        for node in graph.sorted_indices() {
            let name = graph.name(node);
            let (fill_color, stroke_color, width) =
                if ring.is_some_and(|cycle| cycle.contains(name)) {
                    (colors::DEADLOCK_NODE_FILL, colors::DEADLOCK_NODE_STROKE, 3)
                } else {
                    (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE, 2)
                };

            writeln_out!(
                output,
                r#"    "{}" [style="rounded,filled", fillcolor="{}", color="{}", penwidth={}];"#,
                escape_quoted(name),
                fill_color,
                stroke_color,
                width
            )?;
        }

        writeln_out!(output)?;

        for node in graph.sorted_indices() {
            let waiter = graph.name(node);
            for holder_idx in graph.successor_indices(node) {
                let holder = graph.name(holder_idx);
                let line = line_of(graph, waiter, holder)?;
                let in_ring = ring.is_some_and(|cycle| cycle.contains_edge(waiter, holder));
                let (color, width) = if in_ring {
                    (colors::DEADLOCK_EDGE, 3)
                } else {
                    (colors::NORMAL_EDGE, 2)
                };

                writeln_out!(
                    output,
                    r#"    "{}" -> "{}" [label="line {}", color="{}", penwidth={}];"#,
                    escape_quoted(waiter),
                    escape_quoted(holder),
                    line,
                    color,
                    width
                )?;
            }
        }

        if let Some(cycle) = ring {
            writeln_out!(output)?;
            writeln_out!(
                output,
                r#"    label="Deadlock: {}";"#,
                escape_quoted(&cycle.ring())
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }
}

fn line_of(graph: &WaitForGraph, waiter: &str, holder: &str) -> Result<usize, DeadlockLensError> {
    graph
        .edge(waiter, holder)
        .map(|edge| edge.line())
        .ok_or_else(|| DeadlockLensError::GraphError {
            message: format!("Edge '{waiter}' -> '{holder}' not found"),
        })
}

fn graph_index(graph: &WaitForGraph, name: &str) -> Result<NodeIndex, DeadlockLensError> {
    graph
        .index_of(name)
        .ok_or_else(|| DeadlockLensError::GraphError {
            message: format!("Process '{name}' not found"),
        })
}

// Positional ids; sanitized names could collide ("a-b" and "a_b")
fn mermaid_ids(graph: &WaitForGraph) -> HashMap<NodeIndex, String> {
    graph
        .sorted_indices()
        .into_iter()
        .enumerate()
        .map(|(i, node)| (node, format!("p{i}")))
        .collect()
}

fn escape_mermaid(text: &str) -> String {
    text.replace('"', "#quot;")
}
