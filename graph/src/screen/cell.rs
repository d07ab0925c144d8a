use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const RESET: &str = "\u{1b}[0m";

/// One terminal cell: a glyph plus the SGR state active where it prints.
#[derive(Debug, Clone, PartialEq)]
struct Cell {
    /// Grapheme cluster occupying this cell (and its continuations)
    symbol: String,
    /// Raw SGR sequences in effect for this glyph; empty means unstyled
    style: String,
    /// Display width in columns
    width: usize,
}

/// Occupancy of one column.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    /// Nothing written; prints as a blank
    Vacant,
    /// Leading column of a glyph
    Glyph(Cell),
    /// Trailing column of a wide glyph, owned by the glyph to its left;
    /// occupied but not independently writable
    Continuation,
}

/// A single line of terminal cells.
///
/// Writes keep the invariant that every continuation column has an owning
/// glyph to its left: overwriting any column of a wide glyph blanks the
/// columns of it that survive.
#[derive(Debug, Default)]
pub struct LineBuffer {
    slots: Vec<Slot>,
}

impl LineBuffer {
    pub fn from_str(s: &str) -> Self {
        let mut buffer = Self::default();
        buffer.write_str(0, s);
        buffer
    }

    /// Occupied width in columns.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Write a styled fragment starting at display column `col`.
    ///
    /// Columns left of zero are clipped: a glyph whose leading column is
    /// negative is dropped whole. Writing past the end grows the line.
    pub fn write_str(&mut self, col: isize, s: &str) {
        let mut cursor = col;
        let mut last_put: Option<usize> = None;
        for (style, run) in style_runs(s) {
            for grapheme in run.graphemes(true) {
                let width = UnicodeWidthStr::width(grapheme);
                if width == 0 {
                    // Combining input with no base of its own: attach to the
                    // previous glyph rather than corrupting a column.
                    if let Some(at) = last_put {
                        if let Slot::Glyph(cell) = &mut self.slots[at] {
                            cell.symbol.push_str(grapheme);
                        }
                    }
                    continue;
                }
                if cursor >= 0 {
                    self.put(
                        cursor as usize,
                        Cell {
                            symbol: grapheme.to_string(),
                            style: style.clone(),
                            width,
                        },
                    );
                    last_put = Some(cursor as usize);
                }
                cursor += width as isize;
            }
        }
    }

    fn put(&mut self, col: usize, cell: Cell) {
        let width = cell.width;
        self.ensure(col + width);
        self.clear_cols(col, col + width);
        for offset in 1..width {
            self.slots[col + offset] = Slot::Continuation;
        }
        self.slots[col] = Slot::Glyph(cell);
    }

    /// Blank `[from, to)` so no glyph straddles either boundary.
    fn clear_cols(&mut self, from: usize, to: usize) {
        // A wide glyph reaching into the range from the left is destroyed;
        // its surviving columns become blanks.
        let mut left = from;
        while left > 0 && self.slots[left] == Slot::Continuation {
            left -= 1;
        }
        for col in left..from {
            self.slots[col] = Slot::Vacant;
        }
        for col in from..to {
            self.slots[col] = Slot::Vacant;
        }
        // Likewise a wide glyph whose leading column falls inside the range
        // may leave continuations past the right edge.
        let mut right = to;
        while right < self.slots.len() && self.slots[right] == Slot::Continuation {
            self.slots[right] = Slot::Vacant;
            right += 1;
        }
    }

    fn ensure(&mut self, cols: usize) {
        if self.slots.len() < cols {
            self.slots.resize(cols, Slot::Vacant);
        }
    }

    /// Re-encode the cells as a styled string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut active = "";
        for slot in &self.slots {
            match slot {
                Slot::Vacant => {
                    if !active.is_empty() {
                        out.push_str(RESET);
                        active = "";
                    }
                    out.push(' ');
                }
                Slot::Glyph(cell) => {
                    if cell.style != active {
                        if !active.is_empty() {
                            out.push_str(RESET);
                        }
                        out.push_str(&cell.style);
                        active = &cell.style;
                    }
                    out.push_str(&cell.symbol);
                }
                Slot::Continuation => {}
            }
        }
        if !active.is_empty() {
            out.push_str(RESET);
        }
        out
    }
}

/// Split a fragment into (style state, text run) pairs.
///
/// SGR sequences are zero-width: each one folds into the style state carried
/// by the glyphs that follow it. A bare reset clears the state. Non-SGR
/// escape sequences are dropped.
pub(crate) fn style_runs(s: &str) -> Vec<(String, &str)> {
    let mut runs = Vec::new();
    let mut style = String::new();
    let bytes = s.as_bytes();
    let mut run_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != 0x1b {
            i += 1;
            continue;
        }
        if i > run_start {
            runs.push((style.clone(), &s[run_start..i]));
        }
        if bytes.get(i + 1) == Some(&b'[') {
            let mut end = i + 2;
            while end < bytes.len() && !(0x40..=0x7e).contains(&bytes[end]) {
                end += 1;
            }
            if end < bytes.len() {
                if bytes[end] == b'm' {
                    let params = &s[i + 2..end];
                    if params.is_empty() || params == "0" {
                        style.clear();
                    } else {
                        style.push_str(&s[i..=end]);
                    }
                }
                i = end + 1;
            } else {
                i = bytes.len();
            }
        } else {
            i += 1;
        }
        run_start = i;
    }
    if run_start < bytes.len() {
        runs.push((style, &s[run_start..]));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn style_runs_tracks_sgr_state() {
        let runs = style_runs("a\u{1b}[31mbc\u{1b}[0md");
        assert_eq!(
            runs,
            vec![
                (String::new(), "a"),
                ("\u{1b}[31m".to_string(), "bc"),
                (String::new(), "d"),
            ]
        );
    }

    #[test]
    fn style_runs_accumulates_until_reset() {
        let runs = style_runs("\u{1b}[1m\u{1b}[31mx");
        assert_eq!(runs, vec![("\u{1b}[1m\u{1b}[31m".to_string(), "x")]);
    }

    #[test]
    fn buffer_round_trips_plain_text() {
        assert_eq!(LineBuffer::from_str("abc").render(), "abc");
    }

    #[test]
    fn buffer_round_trips_styles() {
        let s = "\u{1b}[31mab\u{1b}[0mc";
        assert_eq!(LineBuffer::from_str(s).render(), "\u{1b}[31mab\u{1b}[0mc");
    }

    #[test]
    fn wide_glyph_occupies_two_columns() {
        let buffer = LineBuffer::from_str("🤬.");
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.render(), "🤬.");
    }

    #[test]
    fn overwriting_continuation_blanks_the_owner() {
        let mut buffer = LineBuffer::from_str("🤬.");
        buffer.write_str(1, "|");
        assert_eq!(buffer.render(), " |.");
    }

    #[test]
    fn overwriting_leading_column_blanks_the_continuation() {
        let mut buffer = LineBuffer::from_str(".🤬.");
        buffer.write_str(1, "|");
        assert_eq!(buffer.render(), ".| .");
    }

    #[test]
    fn wide_overwrite_replaces_narrow_pair() {
        let mut buffer = LineBuffer::from_str("ab.");
        buffer.write_str(0, "🤬");
        assert_eq!(buffer.render(), "🤬.");
    }

    #[test]
    fn negative_columns_are_clipped() {
        let mut buffer = LineBuffer::from_str("abc");
        buffer.write_str(-1, "XY");
        assert_eq!(buffer.render(), "Ybc");
    }

    #[test]
    fn wide_glyph_starting_left_of_zero_is_dropped() {
        let mut buffer = LineBuffer::from_str("abc");
        buffer.write_str(-1, "🤬");
        assert_eq!(buffer.render(), "abc");
    }
}
