use graph::DisplayRow;

use crate::palette::{paint, Palette};

/// A named part of a rendered row line.
///
/// Every line the renderer produces is an ordered segment sequence
/// interpreted by one exhaustive match, so the set of things a line can
/// contain is a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// `"│ "` rails, one per open level
    Indent(usize),
    /// The node glyph, styled normal or selected
    Glyph { highlighted: bool },
    /// Disambiguated prefix of the change id
    ShortId,
    /// Remainder of the full change id
    IdRest,
    Author,
    Timestamp,
    Bookmarks,
    /// The `conflict` tag
    ConflictTag,
    /// Description, or the placeholder when it is blank
    Description,
    /// The `~  (elided revisions)` marker
    Elision,
    /// The `root()` marker
    RootMarker,
    /// Literal, unstyled text
    Text(&'static str),
}

/// Compose one line from `segments` against `row` and `palette`.
pub fn render_segments(segments: &[Segment], row: &DisplayRow, palette: &Palette) -> String {
    let cs = &row.changeset;
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Indent(levels) => {
                for _ in 0..*levels {
                    out.push_str("│ ");
                }
            }
            Segment::Glyph { highlighted } => {
                let glyph = if cs.is_working_copy {
                    "@"
                } else if cs.is_immutable {
                    "◆"
                } else if cs.has_conflict {
                    "×"
                } else {
                    "○"
                };
                let style = if *highlighted {
                    palette.selected
                } else {
                    palette.normal
                };
                out.push_str(&paint(style, glyph));
            }
            Segment::ShortId => out.push_str(&paint(palette.short_id, &cs.change_id_short)),
            Segment::IdRest => out.push_str(&paint(palette.id_rest, cs.id_rest())),
            Segment::Author => out.push_str(&paint(palette.author, &cs.author)),
            Segment::Timestamp => {
                let stamp = cs.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
                out.push_str(&paint(palette.timestamp, &stamp));
            }
            Segment::Bookmarks => {
                out.push_str(&paint(palette.bookmarks, &cs.bookmarks.join(" ")));
            }
            Segment::ConflictTag => out.push_str(&paint(palette.conflict, "conflict")),
            Segment::Description => {
                if cs.is_empty {
                    out.push_str(&paint(palette.empty, "(empty)"));
                    out.push(' ');
                }
                if cs.description.is_empty() {
                    let style = if cs.is_empty {
                        palette.empty
                    } else {
                        palette.non_empty
                    };
                    out.push_str(&paint(style, "(no description)"));
                } else {
                    out.push_str(&paint(palette.normal, &cs.description));
                }
            }
            Segment::Elision => {
                out.push_str(&paint(palette.id_rest, "~  (elided revisions)"));
            }
            Segment::RootMarker => out.push_str(&paint(palette.empty, "root()")),
            Segment::Text(text) => out.push_str(text),
        }
    }
    out
}
