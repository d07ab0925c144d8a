use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Dashboard configuration, loaded from an optional TOML file and overridden
/// by CLI flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Revset displayed by the dashboard
    pub revset: String,
    /// Maximum number of revisions fetched per refresh
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            revset: "::".to_string(),
            limit: 500,
        }
    }
}

impl Config {
    /// Load from `path` if given, else from the default location; missing
    /// files fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_path(),
        };
        match path {
            Some(path) if path.exists() => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
            }
            _ => Ok(Self::default()),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/revui/config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_full_file() {
        let config: Config = toml::from_str("revset = \"@ | trunk()\"\nlimit = 50\n").unwrap();
        assert_eq!(config.revset, "@ | trunk()");
        assert_eq!(config.limit, 50);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("limit = 10\n").unwrap();
        assert_eq!(config.revset, "::");
        assert_eq!(config.limit, 10);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_a_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "revset = \"mine()\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.revset, "mine()");
        assert_eq!(config.limit, 500);
    }
}
