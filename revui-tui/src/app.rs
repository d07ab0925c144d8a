use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crossterm::event::KeyEvent;
use graph::{layout, Changeset, DisplayRow};
use revui_core::{JjClient, JjError};
use revui_ui::{
    help_line, BookmarkPicker, CommandKind, DescribeEditor, EditorOutcome, Overlay, Palette,
    PickerOutcome, RowRenderer,
};

use crate::config::Config;
use crate::keymap::Layer;

/// Events delivered by background refresh workers.
#[derive(Debug)]
pub enum AppEvent {
    Snapshot {
        generation: u64,
        changesets: Vec<Changeset>,
    },
    RefreshFailed {
        generation: u64,
        error: String,
    },
}

/// Which sub-view owns the input.
///
/// Exactly one variant is active at a time, so "is an editor open" is a
/// pattern match rather than a chain of nullable checks.
#[derive(Debug)]
pub enum UiState {
    Browsing,
    /// Choosing a rebase target for the dragged row
    Moving { dragged: usize, branch: bool },
    EditingDescription(DescribeEditor),
    PickingBookmark(BookmarkPicker),
}

/// The dashboard controller: cursor, mode state, and the current rows.
pub struct App {
    client: JjClient,
    config: Config,
    palette: Palette,
    rows: Vec<DisplayRow>,
    cursor: usize,
    state: UiState,
    layer: Layer,
    status: Option<String>,
    /// Generation of the latest requested refresh; snapshots from older
    /// generations are never applied
    generation: u64,
    sender: Sender<AppEvent>,
    events: Receiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(client: JjClient, config: Config) -> Self {
        let (sender, events) = channel();
        Self {
            client,
            config,
            palette: Palette::default(),
            rows: Vec::new(),
            cursor: 0,
            state: UiState::Browsing,
            layer: Layer::base(),
            status: None,
            generation: 0,
            sender,
            events,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Kick off a refresh on a worker thread. The result arrives as an
    /// `AppEvent` and is dropped if a newer refresh was requested meanwhile.
    pub fn request_refresh(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let client = self.client.clone();
        let revset = self.config.revset.clone();
        let limit = self.config.limit;
        let sender = self.sender.clone();
        thread::spawn(move || {
            let event = match client.snapshot(&revset, limit) {
                Ok(changesets) => AppEvent::Snapshot {
                    generation,
                    changesets,
                },
                Err(err) => AppEvent::RefreshFailed {
                    generation,
                    error: err.to_string(),
                },
            };
            let _ = sender.send(event);
        });
    }

    /// Apply pending refresh results. Rows are always replaced wholesale
    /// from one consistent snapshot; a stale result leaves the last good
    /// rows on screen.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AppEvent::Snapshot {
                    generation,
                    changesets,
                } => {
                    if generation != self.generation {
                        continue;
                    }
                    self.rows = layout(&changesets);
                    if self.cursor >= self.rows.len() {
                        self.cursor = self.rows.len().saturating_sub(1);
                    }
                }
                AppEvent::RefreshFailed { generation, error } => {
                    if generation != self.generation {
                        continue;
                    }
                    self.status = Some(format!("refresh failed: {error}"));
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        let state = std::mem::replace(&mut self.state, UiState::Browsing);
        match state {
            UiState::EditingDescription(mut editor) => match editor.handle_key(key) {
                EditorOutcome::Continue => self.state = UiState::EditingDescription(editor),
                EditorOutcome::Cancel => self.reset_input(),
                EditorOutcome::Submit(text) => {
                    let change_id = editor.change_id().to_string();
                    self.run_op("describe", |client| client.describe(&change_id, &text));
                    self.reset_input();
                    self.request_refresh();
                }
            },
            UiState::PickingBookmark(mut picker) => match picker.handle_key(key) {
                PickerOutcome::Continue => self.state = UiState::PickingBookmark(picker),
                PickerOutcome::Cancel => self.reset_input(),
                PickerOutcome::Apply(command) => {
                    let target = picker.change_id().to_string();
                    match command.kind {
                        CommandKind::Move => self.run_op("bookmark set", |client| {
                            client.bookmark_set(&command.name, &target)
                        }),
                        CommandKind::Delete => self.run_op("bookmark delete", |client| {
                            client.bookmark_delete(&command.name)
                        }),
                    };
                    self.reset_input();
                    self.request_refresh();
                }
            },
            UiState::Moving { dragged, branch } => {
                self.state = UiState::Moving { dragged, branch };
                self.handle_move_key(key);
            }
            UiState::Browsing => {
                self.state = UiState::Browsing;
                self.handle_browse_key(key);
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match self.layer {
            Layer::Base(b) => {
                if b.quit.matches(key.code) {
                    self.should_quit = true;
                } else if b.up.matches(key.code) {
                    self.cursor = self.cursor.saturating_sub(1);
                } else if b.down.matches(key.code) {
                    if self.cursor + 1 < self.rows.len() {
                        self.cursor += 1;
                    }
                } else if b.describe.matches(key.code) {
                    if let Some((change_id, description)) = self
                        .selected_changeset()
                        .map(|cs| (cs.change_id.clone(), cs.description.clone()))
                    {
                        self.state =
                            UiState::EditingDescription(DescribeEditor::new(change_id, &description));
                    }
                } else if b.new.matches(key.code) {
                    if let Some(change_id) = self.selected_change_id() {
                        self.run_op("new", |client| client.new_child(&change_id));
                        self.request_refresh();
                    }
                } else if b.edit.matches(key.code) {
                    if let Some(change_id) = self.selected_change_id() {
                        self.run_op("edit", |client| client.edit(&change_id));
                        self.request_refresh();
                    }
                } else if b.refresh.matches(key.code) {
                    self.request_refresh();
                } else if b.rebase.matches(key.code) {
                    self.layer = Layer::rebase();
                } else if b.bookmark.matches(key.code) {
                    self.open_bookmark_picker();
                } else if b.git.matches(key.code) {
                    self.layer = Layer::git();
                }
            }
            Layer::Rebase(b) => {
                if b.revision.matches(key.code) {
                    if !self.rows.is_empty() {
                        self.state = UiState::Moving {
                            dragged: self.cursor,
                            branch: false,
                        };
                    }
                } else if b.branch.matches(key.code) {
                    if !self.rows.is_empty() {
                        self.state = UiState::Moving {
                            dragged: self.cursor,
                            branch: true,
                        };
                    }
                } else if b.up.matches(key.code) {
                    self.cursor = self.cursor.saturating_sub(1);
                } else if b.down.matches(key.code) {
                    if self.cursor + 1 < self.rows.len() {
                        self.cursor += 1;
                    }
                } else if b.cancel.matches(key.code) {
                    self.layer = Layer::base();
                }
            }
            Layer::Git(b) => {
                if b.fetch.matches(key.code) {
                    self.run_op("git fetch", |client| client.git_fetch());
                    self.layer = Layer::base();
                    self.request_refresh();
                } else if b.push.matches(key.code) {
                    self.run_op("git push", |client| client.git_push());
                    self.layer = Layer::base();
                    self.request_refresh();
                } else if b.cancel.matches(key.code) {
                    self.layer = Layer::base();
                }
            }
            // The picker state owns bookmark-layer input; if it is gone the
            // layer is stale.
            Layer::Bookmark(_) => self.layer = Layer::base(),
        }
    }

    fn handle_move_key(&mut self, key: KeyEvent) {
        let (dragged, branch) = match &self.state {
            UiState::Moving { dragged, branch } => (*dragged, *branch),
            _ => return,
        };
        let Layer::Rebase(b) = self.layer else {
            self.reset_input();
            return;
        };
        if b.up.matches(key.code) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if b.down.matches(key.code) {
            if self.cursor + 1 < self.rows.len() {
                self.cursor += 1;
            }
        } else if b.apply.matches(key.code) {
            let pair = self.rows.get(dragged).zip(self.rows.get(self.cursor)).map(
                |(from, dest)| {
                    (
                        from.changeset.change_id.clone(),
                        dest.changeset.change_id.clone(),
                    )
                },
            );
            if let Some((from, dest)) = pair {
                if branch {
                    self.run_op("rebase branch", |client| client.rebase_branch(&from, &dest));
                } else {
                    self.run_op("rebase revision", |client| {
                        client.rebase_revision(&from, &dest)
                    });
                }
                self.request_refresh();
            }
            self.reset_input();
        } else if b.cancel.matches(key.code) {
            self.reset_input();
        }
    }

    fn open_bookmark_picker(&mut self) {
        let Some(change_id) = self.selected_change_id() else {
            return;
        };
        match self.client.bookmark_names() {
            Ok(bookmarks) => {
                let displayed: Vec<String> = self
                    .rows
                    .iter()
                    .map(|row| row.changeset.change_id.clone())
                    .collect();
                self.state =
                    UiState::PickingBookmark(BookmarkPicker::new(change_id, &bookmarks, &displayed));
                self.layer = Layer::bookmark();
            }
            Err(err) => self.status = Some(format!("bookmark list failed: {err}")),
        }
    }

    fn run_op(&mut self, label: &str, op: impl FnOnce(&JjClient) -> Result<(), JjError>) {
        match op(&self.client) {
            Ok(()) => self.status = Some(format!("{label} done")),
            Err(err) => {
                log::warn!("{label} failed: {err}");
                self.status = Some(format!("{label} failed: {err}"));
            }
        }
    }

    fn reset_input(&mut self) {
        self.state = UiState::Browsing;
        self.layer = Layer::base();
    }

    fn selected_changeset(&self) -> Option<&Changeset> {
        self.rows.get(self.cursor).map(|row| &row.changeset)
    }

    fn selected_change_id(&self) -> Option<String> {
        self.selected_changeset().map(|cs| cs.change_id.clone())
    }

    /// Assemble the frame: rendered rows windowed to `height`, then the
    /// help strip and status line.
    pub fn view(&self, height: usize) -> Vec<String> {
        let renderer = RowRenderer::new(&self.palette);
        let mut lines = Vec::new();
        let mut cursor_line = 0;
        for (index, row) in self.rows.iter().enumerate() {
            if matches!(self.state, UiState::Moving { .. }) && index == self.cursor {
                lines.push(renderer.drop_marker(row.level));
            }
            if index == self.cursor {
                cursor_line = lines.len();
            }
            let highlighted = match &self.state {
                UiState::Moving { dragged, .. } => index == *dragged,
                _ => index == self.cursor,
            };
            let overlay: Option<&dyn Overlay> = match &self.state {
                UiState::EditingDescription(editor) if index == self.cursor => Some(editor),
                UiState::PickingBookmark(picker) if index == self.cursor => Some(picker),
                _ => None,
            };
            lines.extend(renderer.render(row, highlighted, overlay));
        }

        let mut footer = vec![String::new(), help_line(&self.palette, &self.layer.short_help())];
        if let UiState::Moving { dragged, branch } = &self.state {
            if let (Some(from), Some(dest)) = (self.rows.get(*dragged), self.rows.get(self.cursor))
            {
                let flag = if *branch { "-b" } else { "-r" };
                footer.push(format!(
                    "jj rebase {flag} {} -d {}",
                    from.changeset.change_id_short, dest.changeset.change_id_short
                ));
            }
        }
        footer.push(match &self.status {
            Some(status) => status.clone(),
            None => format!(
                "{} | {} changesets | {}",
                self.client.workspace_root().display(),
                self.rows.len(),
                self.layer.name()
            ),
        });

        let body_height = height.saturating_sub(footer.len()).max(1);
        let start = if cursor_line >= body_height {
            cursor_line + 1 - body_height
        } else {
            0
        };
        let mut frame: Vec<String> = lines.into_iter().skip(start).take(body_height).collect();
        frame.extend(footer);
        frame
    }
}
