use chrono::{DateTime, Local};
use smallvec::SmallVec;

use super::edge::ParentLink;

/// One revision in the change graph.
///
/// Identity is the full `change_id`; `change_id_short` is a
/// display-disambiguated prefix and is only unique within the current
/// snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Changeset {
    /// Full change identifier
    pub change_id: String,
    /// Shortest unambiguous prefix of the change id
    pub change_id_short: String,
    /// Author name
    pub author: String,
    /// Author timestamp
    pub timestamp: DateTime<Local>,
    /// First line of the description
    pub description: String,
    /// Bookmark names attached to this revision
    pub bookmarks: Vec<String>,
    /// Links to the nearest displayed ancestors
    pub parents: SmallVec<[ParentLink; 2]>,
    pub is_working_copy: bool,
    pub is_immutable: bool,
    pub has_conflict: bool,
    pub is_empty: bool,
    pub is_root: bool,
}

impl Changeset {
    pub fn new(
        change_id: impl Into<String>,
        change_id_short: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Local>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            change_id: change_id.into(),
            change_id_short: change_id_short.into(),
            author: author.into(),
            timestamp,
            description: description.into(),
            bookmarks: Vec::new(),
            parents: SmallVec::new(),
            is_working_copy: false,
            is_immutable: false,
            has_conflict: false,
            is_empty: false,
            is_root: false,
        }
    }

    /// The part of the full id after the disambiguated prefix.
    pub fn id_rest(&self) -> &str {
        self.change_id
            .get(self.change_id_short.len()..)
            .unwrap_or("")
    }
}
