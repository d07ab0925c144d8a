use unicode_width::UnicodeWidthStr;

use super::cell::{style_runs, LineBuffer};

/// Overlay `overlay` onto `base` starting at display column `x`.
///
/// Wherever the overlay occupies a column it replaces the base glyph there;
/// an overlay landing on the continuation column of a wide base glyph
/// destroys the whole glyph and blanks its surviving column, so the result
/// never contains a dangling continuation cell.
///
/// Out-of-range policy: columns left of zero are clipped (an overlay glyph
/// starting there is dropped), while an `x` past the end of the base pads
/// the gap with blanks. `y` is reserved for a future multi-line buffer; the
/// current contract is a single line.
pub fn stacked(base: &str, overlay: &str, x: isize, y: isize) -> String {
    let _ = y;
    let mut line = LineBuffer::from_str(base);
    line.write_str(x, overlay);
    line.render()
}

/// Display width of a styled fragment in terminal columns.
///
/// Escape sequences are zero-width; glyph widths come from the system width
/// classification, with unclassified input counting one column.
pub fn display_width(s: &str) -> usize {
    style_runs(s)
        .iter()
        .map(|(_, run)| UnicodeWidthStr::width(*run))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overlapping_double_width() {
        assert_eq!(stacked("🤬.", "|", 1, 0), " |.");
    }

    #[test]
    fn overlay_replaces_base_columns() {
        assert_eq!(stacked("abcdef", "XY", 2, 0), "abXYef");
    }

    #[test]
    fn overlay_past_the_end_pads_with_blanks() {
        assert_eq!(stacked("ab", "xy", 5, 0), "ab   xy");
    }

    #[test]
    fn overlay_on_empty_base_pads_from_column_zero() {
        assert_eq!(stacked("", "x", 2, 0), "  x");
    }

    #[test]
    fn negative_start_clips_the_overlay() {
        assert_eq!(stacked("abc", "XY", -1, 0), "Ybc");
    }

    #[test]
    fn fully_negative_overlay_is_a_no_op() {
        assert_eq!(stacked("abc", "X", -5, 0), "abc");
    }

    #[test]
    fn styles_survive_stacking() {
        let base = "\u{1b}[31mab\u{1b}[0m";
        assert_eq!(stacked(base, "X", 1, 0), "\u{1b}[31ma\u{1b}[0mX");
    }

    #[test]
    fn styled_overlay_keeps_its_style() {
        let overlay = "\u{1b}[32mX\u{1b}[0m";
        assert_eq!(stacked("abc", overlay, 1, 0), "a\u{1b}[32mX\u{1b}[0mc");
    }

    #[test]
    fn width_is_conserved() {
        let cases = [
            ("🤬.", "|", 1),
            ("abc", "XY", 2),
            ("ab", "xy", 5),
            ("你好", "x", 0),
            ("", "🤬", 3),
        ];
        for (base, overlay, x) in cases {
            let expected = display_width(base).max(x + display_width(overlay));
            assert_eq!(
                display_width(&stacked(base, overlay, x as isize, 0)),
                expected,
                "base={base:?} overlay={overlay:?} x={x}"
            );
        }
    }

    #[test]
    fn stacking_is_pure() {
        let base = "🤬.";
        assert_eq!(stacked(base, "|", 1, 0), stacked(base, "|", 1, 0));
        assert_eq!(base, "🤬.");
    }

    #[test]
    fn display_width_ignores_escape_sequences() {
        assert_eq!(display_width("\u{1b}[1;31mab\u{1b}[0m"), 2);
        assert_eq!(display_width("你好"), 4);
    }
}
