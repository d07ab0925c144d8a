use crossterm::event::{KeyCode, KeyEvent};
use crossterm::style::{Attribute, ContentStyle};
use unicode_segmentation::UnicodeSegmentation;

use crate::palette::paint;
use crate::render::Overlay;

/// Inline single-line editor for a revision description.
#[derive(Debug, Clone)]
pub struct DescribeEditor {
    change_id: String,
    buffer: String,
    /// Cursor position as a grapheme index into `buffer`
    cursor: usize,
}

/// What a key press did to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Continue,
    Submit(String),
    Cancel,
}

impl DescribeEditor {
    pub fn new(change_id: impl Into<String>, seed: &str) -> Self {
        let buffer = seed.to_string();
        let cursor = buffer.graphemes(true).count();
        Self {
            change_id: change_id.into(),
            buffer,
            cursor,
        }
    }

    pub fn change_id(&self) -> &str {
        &self.change_id
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorOutcome {
        match key.code {
            KeyCode::Enter => EditorOutcome::Submit(self.buffer.clone()),
            KeyCode::Esc => EditorOutcome::Cancel,
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                EditorOutcome::Continue
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let from = self.byte_offset(self.cursor - 1);
                    let to = self.byte_offset(self.cursor);
                    self.buffer.replace_range(from..to, "");
                    self.cursor -= 1;
                }
                EditorOutcome::Continue
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                EditorOutcome::Continue
            }
            KeyCode::Right => {
                let len = self.buffer.graphemes(true).count();
                self.cursor = (self.cursor + 1).min(len);
                EditorOutcome::Continue
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditorOutcome::Continue
            }
            KeyCode::End => {
                self.cursor = self.buffer.graphemes(true).count();
                EditorOutcome::Continue
            }
            _ => EditorOutcome::Continue,
        }
    }

    fn byte_offset(&self, grapheme_index: usize) -> usize {
        self.buffer
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.buffer.len())
    }
}

impl Overlay for DescribeEditor {
    fn view(&self) -> String {
        let label = ContentStyle {
            attributes: Attribute::Dim.into(),
            ..ContentStyle::default()
        };
        let cursor_style = ContentStyle {
            attributes: Attribute::Reverse.into(),
            ..ContentStyle::default()
        };

        let mut out = paint(label, "describe:");
        out.push(' ');
        for (index, grapheme) in self.buffer.graphemes(true).enumerate() {
            if index == self.cursor {
                out.push_str(&paint(cursor_style, grapheme));
            } else {
                out.push_str(grapheme);
            }
        }
        if self.cursor >= self.buffer.graphemes(true).count() {
            out.push_str(&paint(cursor_style, " "));
        }
        out
    }
}
