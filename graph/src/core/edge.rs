/// A child-to-parent reference, as delivered by the refresh layer.
///
/// The target is the nearest *displayed* ancestor; `elided` is set when
/// revisions between the child and the target were filtered from display.
/// Links never form cycles; the underlying graph is a DAG by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    /// Change id of the displayed ancestor
    pub id: String,
    /// True when intermediate ancestors were elided
    pub elided: bool,
}

impl ParentLink {
    pub fn direct(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elided: false,
        }
    }

    pub fn elided(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elided: true,
        }
    }
}

/// How a displayed row connects to the rows rendered above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// The displayed link corresponds to an immediate parent/child pair
    Direct,
    /// The displayed link skips elided ancestors
    Indirect,
}
