use std::path::{Path, PathBuf};
use std::process::Command;

use graph::Changeset;

use crate::error::JjError;
use crate::parse::{self, FIELD_SEP, RECORD_SEP};

/// Subprocess client for the `jj` binary.
///
/// Every structural operation the dashboard offers is a thin command
/// wrapper; the interesting part is `snapshot`, which fetches and parses
/// the displayed revision list.
#[derive(Debug, Clone)]
pub struct JjClient {
    root: PathBuf,
}

impl JjClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<String, JjError> {
        log::debug!("jj {}", args.join(" "));
        let output = Command::new("jj")
            .args(args)
            .current_dir(&self.root)
            .output()?;
        if !output.status.success() {
            return Err(JjError::Command {
                command: args.first().unwrap_or(&"jj").to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fetch one consistent snapshot of the displayed revisions, in jj's
    /// output order, with parent links already rewritten to the nearest
    /// displayed ancestors.
    pub fn snapshot(&self, revset: &str, limit: usize) -> Result<Vec<Changeset>, JjError> {
        let template = parse::log_template();
        let limit = limit.to_string();
        let output = self.run(&[
            "log",
            "--no-graph",
            "--color",
            "never",
            "-n",
            &limit,
            "-r",
            revset,
            "-T",
            &template,
        ])?;
        let mut changesets = parse::parse_log(&output)?;
        parse::resolve_elided_links(&mut changesets, |missing| {
            self.nearest_displayed(missing, revset).ok().flatten()
        });
        Ok(changesets)
    }

    /// Nearest ancestor of `id` that `revset` still displays.
    fn nearest_displayed(&self, id: &str, revset: &str) -> Result<Option<String>, JjError> {
        let probe = format!("latest(::{id} & ({revset}), 1)");
        let output = self.run(&[
            "log",
            "--no-graph",
            "--color",
            "never",
            "-r",
            &probe,
            "-T",
            "change_id",
        ])?;
        let ancestor = output.trim();
        Ok((!ancestor.is_empty()).then(|| ancestor.to_string()))
    }

    /// Bookmark names with their current target change ids.
    pub fn bookmark_names(&self) -> Result<Vec<(String, String)>, JjError> {
        let template = format!(
            "name ++ \"{FIELD_SEP}\" ++ if(normal_target, normal_target.change_id(), \"\") ++ \"{RECORD_SEP}\""
        );
        let output = self.run(&["bookmark", "list", "-T", &template])?;
        let mut bookmarks = Vec::new();
        for record in output.split(RECORD_SEP) {
            if record.trim().is_empty() {
                continue;
            }
            let mut fields = record.split(FIELD_SEP);
            let name = fields.next().unwrap_or_default().trim().to_string();
            let target = fields.next().unwrap_or_default().trim().to_string();
            if !name.is_empty() {
                bookmarks.push((name, target));
            }
        }
        Ok(bookmarks)
    }

    pub fn rebase_revision(&self, revision: &str, destination: &str) -> Result<(), JjError> {
        self.run(&["rebase", "-r", revision, "-d", destination])
            .map(drop)
    }

    pub fn rebase_branch(&self, revision: &str, destination: &str) -> Result<(), JjError> {
        self.run(&["rebase", "-b", revision, "-d", destination])
            .map(drop)
    }

    pub fn describe(&self, revision: &str, message: &str) -> Result<(), JjError> {
        self.run(&["describe", "-r", revision, "-m", message])
            .map(drop)
    }

    pub fn new_child(&self, revision: &str) -> Result<(), JjError> {
        self.run(&["new", revision]).map(drop)
    }

    pub fn edit(&self, revision: &str) -> Result<(), JjError> {
        self.run(&["edit", revision]).map(drop)
    }

    pub fn bookmark_set(&self, name: &str, revision: &str) -> Result<(), JjError> {
        self.run(&["bookmark", "set", name, "-r", revision])
            .map(drop)
    }

    pub fn bookmark_delete(&self, name: &str) -> Result<(), JjError> {
        self.run(&["bookmark", "delete", name]).map(drop)
    }

    pub fn git_fetch(&self) -> Result<(), JjError> {
        self.run(&["git", "fetch"]).map(drop)
    }

    pub fn git_push(&self) -> Result<(), JjError> {
        self.run(&["git", "push"]).map(drop)
    }
}
