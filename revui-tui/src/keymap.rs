use crossterm::event::KeyCode;

/// A single key binding with its help entry.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub keys: &'static [KeyCode],
    pub help: (&'static str, &'static str),
}

impl Binding {
    pub const fn new(
        keys: &'static [KeyCode],
        key_label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            keys,
            help: (key_label, description),
        }
    }

    pub fn matches(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BaseBindings {
    pub up: Binding,
    pub down: Binding,
    pub describe: Binding,
    pub new: Binding,
    pub edit: Binding,
    pub rebase: Binding,
    pub bookmark: Binding,
    pub git: Binding,
    pub refresh: Binding,
    pub quit: Binding,
}

#[derive(Debug, Clone, Copy)]
pub struct RebaseBindings {
    pub revision: Binding,
    pub branch: Binding,
    pub up: Binding,
    pub down: Binding,
    pub apply: Binding,
    pub cancel: Binding,
}

#[derive(Debug, Clone, Copy)]
pub struct BookmarkBindings {
    pub up: Binding,
    pub down: Binding,
    pub apply: Binding,
    pub cancel: Binding,
}

#[derive(Debug, Clone, Copy)]
pub struct GitBindings {
    pub fetch: Binding,
    pub push: Binding,
    pub cancel: Binding,
}

/// The active modal key layer.
///
/// Each variant owns its strongly-typed binding set; dispatch and help are
/// exhaustive matches over this enum.
#[derive(Debug, Clone, Copy)]
pub enum Layer {
    Base(BaseBindings),
    Rebase(RebaseBindings),
    Bookmark(BookmarkBindings),
    Git(GitBindings),
}

const UP: Binding = Binding::new(&[KeyCode::Char('k'), KeyCode::Up], "k", "up");
const DOWN: Binding = Binding::new(&[KeyCode::Char('j'), KeyCode::Down], "j", "down");
const APPLY: Binding = Binding::new(&[KeyCode::Enter], "enter", "apply");
const CANCEL: Binding = Binding::new(&[KeyCode::Esc], "esc", "cancel");

impl Layer {
    pub fn base() -> Self {
        Layer::Base(BaseBindings {
            up: UP,
            down: DOWN,
            describe: Binding::new(&[KeyCode::Char('d')], "d", "describe"),
            new: Binding::new(&[KeyCode::Char('n')], "n", "new"),
            edit: Binding::new(&[KeyCode::Char('e')], "e", "edit"),
            rebase: Binding::new(&[KeyCode::Char('r')], "r", "rebase"),
            bookmark: Binding::new(&[KeyCode::Char('b')], "b", "bookmark"),
            git: Binding::new(&[KeyCode::Char('g')], "g", "git"),
            refresh: Binding::new(&[KeyCode::Char('R')], "R", "refresh"),
            quit: Binding::new(&[KeyCode::Char('q')], "q", "quit"),
        })
    }

    pub fn rebase() -> Self {
        Layer::Rebase(RebaseBindings {
            revision: Binding::new(&[KeyCode::Char('r')], "r", "rebase revision"),
            branch: Binding::new(&[KeyCode::Char('b')], "b", "rebase branch"),
            up: UP,
            down: DOWN,
            apply: APPLY,
            cancel: CANCEL,
        })
    }

    pub fn bookmark() -> Self {
        Layer::Bookmark(BookmarkBindings {
            up: UP,
            down: DOWN,
            apply: Binding::new(&[KeyCode::Enter], "enter", "run command"),
            cancel: CANCEL,
        })
    }

    pub fn git() -> Self {
        Layer::Git(GitBindings {
            fetch: Binding::new(&[KeyCode::Char('f')], "f", "git fetch"),
            push: Binding::new(&[KeyCode::Char('p')], "p", "git push"),
            cancel: CANCEL,
        })
    }

    /// Help entries for the active layer, in display order.
    pub fn short_help(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Layer::Base(b) => vec![
                b.up.help,
                b.down.help,
                b.describe.help,
                b.new.help,
                b.edit.help,
                b.rebase.help,
                b.bookmark.help,
                b.git.help,
                b.refresh.help,
                b.quit.help,
            ],
            Layer::Rebase(b) => vec![
                b.revision.help,
                b.branch.help,
                b.apply.help,
                b.cancel.help,
            ],
            Layer::Bookmark(b) => vec![b.up.help, b.down.help, b.apply.help, b.cancel.help],
            Layer::Git(b) => vec![b.fetch.help, b.push.help, b.cancel.help],
        }
    }

    /// Short label shown in the status line.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Base(_) => "base",
            Layer::Rebase(_) => "rebase",
            Layer::Bookmark(_) => "bookmark",
            Layer::Git(_) => "git",
        }
    }
}
