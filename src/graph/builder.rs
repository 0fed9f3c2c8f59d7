use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{ProcessNode, Relation, WaitEdge, WaitForGraph};
use crate::constants::syntax::{ARROW, COMMENT_PREFIX};
use crate::error::{ParseError, ParseErrorKind};

/// Builder for constructing wait-for graphs
///
/// Relations can be added one at a time, parsed from text statements, or
/// taken from structured records. Re-adding a relation is a no-op, so the
/// finished graph never holds duplicate edges.
#[derive(Debug, Default)]
pub struct WaitForGraphBuilder {
    graph: DiGraph<ProcessNode, WaitEdge>,
    indices: HashMap<String, NodeIndex>,
}

impl WaitForGraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    fn node_index(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.indices.get(name) {
            return index;
        }
        let index = self.graph.add_node(ProcessNode::new(name));
        self.indices.insert(name.to_string(), index);
        index
    }

    /// Record that `waiter` waits for `holder`, declared on `line`
    ///
    /// Returns `false` if the relation was already present. Identifiers are
    /// not validated here; use [`parse_line`](Self::parse_line) or
    /// [`add_relations`](Self::add_relations) for untrusted input.
    pub fn add_relation(&mut self, waiter: &str, holder: &str, line: usize) -> bool {
        let from = self.node_index(waiter);
        let to = self.node_index(holder);

        if self.graph.find_edge(from, to).is_some() {
            return false;
        }

        self.graph.add_edge(from, to, WaitEdge::new(line));
        true
    }

    /// Parse a single statement
    ///
    /// Returns `Ok(None)` for blank and comment lines, or the
    /// `(waiter, holder)` pair for a relation. The statement is split on the
    /// first `->` when one is present and on the first whitespace run
    /// otherwise; a statement with extra tokens leaves whitespace inside the
    /// holder and is rejected as [`ParseErrorKind::WhitespaceInIdentifier`].
    pub fn parse_line(line_number: usize, raw: &str) -> Result<Option<(&str, &str)>, ParseError> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            return Ok(None);
        }

        let parts = if line.contains(ARROW) {
            line.split_once(ARROW)
        } else {
            line.split_once(char::is_whitespace)
        };

        let Some((waiter, holder)) = parts else {
            return Err(ParseError::new(ParseErrorKind::MalformedLine, line_number, line));
        };

        let (waiter, holder) = validate_pair(waiter, holder, line_number, line)?;
        Ok(Some((waiter, holder)))
    }

    /// Parse every statement from `lines`, stopping at the first error
    pub fn parse_lines<I, S>(mut self, lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, raw) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            if let Some((waiter, holder)) = Self::parse_line(line_number, raw.as_ref())? {
                self.add_relation(waiter, holder, line_number);
            }
        }
        Ok(self)
    }

    /// Parse a whole snapshot of text
    pub fn parse_str(self, text: &str) -> Result<Self, ParseError> {
        self.parse_lines(text.lines())
    }

    /// Add structured records; the 1-based record index stands in for the line
    /// number in errors and edges
    pub fn add_relations<'a, I>(mut self, relations: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = &'a Relation>,
    {
        for (index, relation) in relations.into_iter().enumerate() {
            let record_number = index + 1;
            let raw = format!("{} -> {}", relation.waiter, relation.holder);
            let (waiter, holder) =
                validate_pair(&relation.waiter, &relation.holder, record_number, &raw)?;
            self.add_relation(waiter, holder, record_number);
        }
        Ok(self)
    }

    /// Finish building; the returned graph is immutable
    pub fn build(self) -> WaitForGraph {
        WaitForGraph {
            graph: self.graph,
            indices: self.indices,
        }
    }
}

fn validate_pair<'a>(
    waiter: &'a str,
    holder: &'a str,
    line_number: usize,
    raw: &str,
) -> Result<(&'a str, &'a str), ParseError> {
    let waiter = waiter.trim();
    let holder = holder.trim();

    if waiter.is_empty() || holder.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyIdentifier, line_number, raw));
    }

    if waiter.contains(char::is_whitespace) || holder.contains(char::is_whitespace) {
        return Err(ParseError::new(
            ParseErrorKind::WhitespaceInIdentifier,
            line_number,
            raw,
        ));
    }

    Ok((waiter, holder))
}
