use crate::core::{Changeset, EdgeType};

/// One render unit: a changeset plus its computed position in the layout.
///
/// Rows are recomputed in full on every refresh and replaced atomically;
/// they are never mutated incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub changeset: Changeset,
    /// Indentation depth of the node's lane
    pub level: usize,
    /// True when this row is the primary continuation of its parent's line;
    /// false for rows that open a new branch at an indented level
    pub is_first_child: bool,
    /// How this row connects to the rows displayed above it
    pub edge_type: EdgeType,
    /// An elision marker must be rendered immediately above this row
    pub elided: bool,
}
