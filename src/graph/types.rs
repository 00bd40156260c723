//! Core type definitions for the follower graph
//!
//! An [`Edge`] is one follower -> target relationship. Raw input rows reach the
//! graph through [`EdgeRecord`], which turns a row into an edge or explains why
//! it cannot.

use super::store::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use follower_graph_algorithms::NodeId;

/// A directed follower -> target relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub follower: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(follower: NodeId, target: NodeId) -> Self {
        Edge { follower, target }
    }

    pub fn is_self_loop(&self) -> bool {
        self.follower == self.target
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.follower, self.target)
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((follower, target): (NodeId, NodeId)) -> Self {
        Edge { follower, target }
    }
}

/// Anything that can be read as one edge.
///
/// `row` is the zero-based position of the record in the input and is only
/// used for error reporting.
pub trait EdgeRecord {
    fn to_edge(&self, row: usize) -> GraphResult<Edge>;
}

impl EdgeRecord for Edge {
    fn to_edge(&self, _row: usize) -> GraphResult<Edge> {
        Ok(*self)
    }
}

impl EdgeRecord for (NodeId, NodeId) {
    fn to_edge(&self, _row: usize) -> GraphResult<Edge> {
        Ok(Edge::from(*self))
    }
}

impl EdgeRecord for (&str, &str) {
    fn to_edge(&self, row: usize) -> GraphResult<Edge> {
        Ok(Edge::new(parse_id(self.0, row)?, parse_id(self.1, row)?))
    }
}

impl EdgeRecord for (String, String) {
    fn to_edge(&self, row: usize) -> GraphResult<Edge> {
        Ok(Edge::new(parse_id(&self.0, row)?, parse_id(&self.1, row)?))
    }
}

/// A row of already split fields; must hold exactly two
impl<S: AsRef<str>> EdgeRecord for [S] {
    fn to_edge(&self, row: usize) -> GraphResult<Edge> {
        fields_to_edge(self.iter().map(AsRef::as_ref), row)
    }
}

impl<S: AsRef<str>> EdgeRecord for Vec<S> {
    fn to_edge(&self, row: usize) -> GraphResult<Edge> {
        self.as_slice().to_edge(row)
    }
}

impl<R: EdgeRecord + ?Sized> EdgeRecord for &R {
    fn to_edge(&self, row: usize) -> GraphResult<Edge> {
        (**self).to_edge(row)
    }
}

/// One unsplit line of a delimited file, e.g. `"17,42"`
///
/// A row that knows its line number in the source file reports that number in
/// errors instead of its position in the record slice.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedRow<'a> {
    line: &'a str,
    delimiter: char,
    line_number: Option<usize>,
}

impl<'a> DelimitedRow<'a> {
    pub fn new(line: &'a str, delimiter: char) -> Self {
        DelimitedRow {
            line,
            delimiter,
            line_number: None,
        }
    }

    /// A row read from line `line_number` (1-based) of a file
    pub fn numbered(line: &'a str, delimiter: char, line_number: usize) -> Self {
        DelimitedRow {
            line,
            delimiter,
            line_number: Some(line_number),
        }
    }
}

impl EdgeRecord for DelimitedRow<'_> {
    fn to_edge(&self, row: usize) -> GraphResult<Edge> {
        let row = self.line_number.unwrap_or(row);
        fields_to_edge(self.line.split(self.delimiter), row)
    }
}

/// Split file contents into rows, skipping blank lines. Each row keeps its
/// 1-based line number so errors point at the file.
pub fn delimited_rows(text: &str, delimiter: char) -> Vec<DelimitedRow<'_>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| DelimitedRow::numbered(line, delimiter, idx + 1))
        .collect()
}

fn fields_to_edge<'a, I>(mut fields: I, row: usize) -> GraphResult<Edge>
where
    I: Iterator<Item = &'a str>,
{
    let follower = fields
        .next()
        .ok_or_else(|| malformed(row, "missing follower field".to_string()))?;
    let target = fields
        .next()
        .ok_or_else(|| malformed(row, "missing target field".to_string()))?;
    if fields.next().is_some() {
        return Err(malformed(row, "expected exactly two fields".to_string()));
    }
    Ok(Edge::new(parse_id(follower, row)?, parse_id(target, row)?))
}

fn parse_id(field: &str, row: usize) -> GraphResult<NodeId> {
    let field = field.trim();
    if field.is_empty() {
        return Err(malformed(row, "empty id field".to_string()));
    }
    field
        .parse::<NodeId>()
        .map_err(|_| malformed(row, format!("`{}` is not a non-negative integer id", field)))
}

fn malformed(row: usize, reason: String) -> GraphError {
    GraphError::MalformedInput { row, reason }
}
