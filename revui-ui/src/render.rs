use graph::{screen, DisplayRow};

use crate::palette::{paint, Palette};
use crate::segment::{render_segments, Segment};

/// A sub-view that can be spliced into a highlighted row.
///
/// Rendering must be side-effect free: the renderer calls `view` purely to
/// obtain the text to stack onto the graph.
pub trait Overlay {
    fn view(&self) -> String;
}

/// Turns display rows into styled text blocks.
pub struct RowRenderer<'a> {
    pub palette: &'a Palette,
}

impl<'a> RowRenderer<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        RowRenderer { palette }
    }

    /// Render one row as its two or three content lines, plus overlay and
    /// branch-join lines where they apply.
    pub fn render(
        &self,
        row: &DisplayRow,
        highlighted: bool,
        overlay: Option<&dyn Overlay>,
    ) -> Vec<String> {
        let level = row.level;
        let mut lines = Vec::new();

        if row.elided {
            lines.push(render_segments(
                &[Segment::Indent(level), Segment::Elision],
                row,
                self.palette,
            ));
        }

        let mut metadata = vec![
            Segment::Indent(level),
            Segment::Glyph { highlighted },
            Segment::Text("  "),
            Segment::ShortId,
            Segment::IdRest,
        ];
        if row.changeset.is_root {
            // The root renders as a single line: id plus marker, nothing else.
            metadata.extend([Segment::Text(" "), Segment::RootMarker]);
            lines.push(render_segments(&metadata, row, self.palette));
            return lines;
        }
        metadata.extend([
            Segment::Text(" "),
            Segment::Author,
            Segment::Text(" "),
            Segment::Timestamp,
        ]);
        if !row.changeset.bookmarks.is_empty() {
            metadata.extend([Segment::Text(" "), Segment::Bookmarks]);
        }
        if row.changeset.has_conflict {
            metadata.extend([Segment::Text(" "), Segment::ConflictTag]);
        }
        lines.push(render_segments(&metadata, row, self.palette));

        lines.push(render_segments(
            &[
                Segment::Indent(level),
                Segment::Text("│  "),
                Segment::Description,
            ],
            row,
            self.palette,
        ));

        if highlighted {
            if let Some(overlay) = overlay {
                // Stack the overlay onto the open rails so the graph keeps
                // its column alignment to the left of the panel.
                let rails = "│ ".repeat(level + 1);
                let x = (2 * (level + 1)) as isize;
                for overlay_line in overlay.view().lines() {
                    lines.push(screen::stacked(&rails, overlay_line, x, 0));
                }
            }
        }

        if !row.is_first_child && level > 0 {
            lines.push(render_segments(
                &[Segment::Indent(level - 1), Segment::Text("├─╯")],
                row,
                self.palette,
            ));
        }

        lines
    }

    /// The `<< here >>` marker line shown above the rebase target row.
    pub fn drop_marker(&self, level: usize) -> String {
        let marker = paint(self.palette.drop_target, "<< here >>");
        screen::stacked(&"│ ".repeat(level), &marker, (2 * level) as isize, 0)
    }
}
