use crate::palette::{paint, Palette};

/// Render the active key layer's bindings as a one-line help strip.
pub fn help_line(palette: &Palette, bindings: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (index, (key, description)) in bindings.iter().enumerate() {
        if index > 0 {
            out.push_str(" • ");
        }
        out.push_str(&paint(palette.short_id, key));
        out.push(' ');
        out.push_str(&paint(palette.id_rest, description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_bindings_with_separators() {
        let palette = Palette::plain();
        let line = help_line(&palette, &[("j", "down"), ("k", "up"), ("q", "quit")]);
        assert_eq!(line, "j down • k up • q quit");
    }

    #[test]
    fn empty_bindings_render_nothing() {
        let palette = Palette::plain();
        assert_eq!(help_line(&palette, &[]), "");
    }
}
