use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::style::{Attribute, ContentStyle};

use crate::palette::paint;
use crate::render::Overlay;

/// What a picker command does to its bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandKind {
    /// Point the bookmark at the selected revision
    Move,
    /// Delete the bookmark
    Delete,
}

/// One selectable command in the bookmark picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkCommand {
    pub kind: CommandKind,
    pub name: String,
    /// Graph distance from the selected revision to the bookmark's current
    /// target; positive points down the displayed list
    pub distance: isize,
}

impl BookmarkCommand {
    pub fn label(&self) -> String {
        match self.kind {
            CommandKind::Move => format!("move {}", self.name),
            CommandKind::Delete => format!("delete {}", self.name),
        }
    }
}

/// What a key press did to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Continue,
    Apply(BookmarkCommand),
    Cancel,
}

/// Picker offering bookmark commands for the selected revision, nearest
/// targets first.
#[derive(Debug, Clone)]
pub struct BookmarkPicker {
    change_id: String,
    commands: Vec<BookmarkCommand>,
    selected: usize,
}

impl BookmarkPicker {
    /// `bookmarks` pairs every bookmark name with its current target id;
    /// `displayed_ids` is the id sequence of the displayed snapshot.
    pub fn new(
        change_id: impl Into<String>,
        bookmarks: &[(String, String)],
        displayed_ids: &[String],
    ) -> Self {
        let change_id = change_id.into();
        let distances = distance_map(&change_id, displayed_ids);
        let mut commands = Vec::with_capacity(bookmarks.len() * 2);
        for (name, target) in bookmarks {
            let distance = distances.get(target).copied().unwrap_or(0);
            commands.push(BookmarkCommand {
                kind: CommandKind::Move,
                name: name.clone(),
                distance,
            });
            commands.push(BookmarkCommand {
                kind: CommandKind::Delete,
                name: name.clone(),
                distance,
            });
        }
        sort_commands(&mut commands);
        Self {
            change_id,
            commands,
            selected: 0,
        }
    }

    pub fn change_id(&self) -> &str {
        &self.change_id
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Esc => PickerOutcome::Cancel,
            KeyCode::Enter => match self.commands.get(self.selected) {
                Some(command) => PickerOutcome::Apply(command.clone()),
                None => PickerOutcome::Cancel,
            },
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.commands.len() {
                    self.selected += 1;
                }
                PickerOutcome::Continue
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                PickerOutcome::Continue
            }
            _ => PickerOutcome::Continue,
        }
    }
}

impl Overlay for BookmarkPicker {
    fn view(&self) -> String {
        let selected_style = ContentStyle {
            attributes: Attribute::Reverse.into(),
            ..ContentStyle::default()
        };
        let mut out = String::new();
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            if index == self.selected {
                out.push_str("> ");
                out.push_str(&paint(selected_style, &command.label()));
            } else {
                out.push_str("  ");
                out.push_str(&command.label());
            }
        }
        if self.commands.is_empty() {
            out.push_str("(no bookmarks)");
        }
        out
    }
}

/// Distance of every displayed revision from the selected one: positive for
/// revisions below it, negative above, zero for the selection itself and for
/// ids that are not displayed.
pub fn distance_map(selected_id: &str, change_ids: &[String]) -> HashMap<String, isize> {
    let origin = match change_ids.iter().position(|id| id == selected_id) {
        Some(position) => position as isize,
        None => return HashMap::new(),
    };
    change_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.clone(), index as isize - origin))
        .collect()
}

fn sort_commands(commands: &mut [BookmarkCommand]) {
    commands.sort_by_key(|c| (c.kind, c.distance < 0, c.distance.abs()));
}
