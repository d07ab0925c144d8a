use crossterm::style::{Attribute, Color, ContentStyle};

/// Semantic style table used by the row renderer.
///
/// The renderer only ever selects *which* entry applies; what an entry looks
/// like on screen is decided here (or by whoever supplies the palette).
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub normal: ContentStyle,
    pub selected: ContentStyle,
    pub short_id: ContentStyle,
    pub id_rest: ContentStyle,
    pub author: ContentStyle,
    pub timestamp: ContentStyle,
    pub bookmarks: ContentStyle,
    pub conflict: ContentStyle,
    /// Placeholder styling for empty changesets
    pub empty: ContentStyle,
    /// Placeholder styling for changesets with content but no description
    pub non_empty: ContentStyle,
    /// The `<< here >>` rebase target marker
    pub drop_target: ContentStyle,
}

impl Palette {
    /// A palette with no styling at all. Output is plain text, which keeps
    /// golden-string assertions readable.
    pub fn plain() -> Self {
        let none = ContentStyle::new();
        Self {
            normal: none,
            selected: none,
            short_id: none,
            id_rest: none,
            author: none,
            timestamp: none,
            bookmarks: none,
            conflict: none,
            empty: none,
            non_empty: none,
            drop_target: none,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: ContentStyle::new(),
            selected: with_attr(fg(Color::Cyan), Attribute::Bold),
            short_id: fg(Color::Magenta),
            id_rest: fg(Color::DarkGrey),
            author: fg(Color::Yellow),
            timestamp: fg(Color::Cyan),
            bookmarks: fg(Color::Magenta),
            conflict: fg(Color::Red),
            empty: fg(Color::Green),
            non_empty: fg(Color::DarkYellow),
            drop_target: with_attr(fg(Color::Red), Attribute::Bold),
        }
    }
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

fn with_attr(mut style: ContentStyle, attr: Attribute) -> ContentStyle {
    style.attributes = style.attributes.with(attr);
    style
}

/// Apply `style` to `text`, producing an ANSI-styled fragment.
pub fn paint(style: ContentStyle, text: &str) -> String {
    style.apply(text).to_string()
}
