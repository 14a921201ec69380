//! Configuration loading and management
//!
//! Handles parsing of the optional `.notebook.toml` in the data directory.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::storage::CONFIG_FILE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Data file names
    #[serde(default)]
    pub storage: StorageConfig,

    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,
}

/// Data file naming
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Notes file, relative to the data directory
    #[serde(default = "default_notes_file")]
    pub notes_file: String,

    /// To-do file, relative to the data directory
    #[serde(default = "default_todos_file")]
    pub todos_file: String,
}

fn default_notes_file() -> String {
    "notes.json".to_string()
}

fn default_todos_file() -> String {
    "todos.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notes_file: default_notes_file(),
            todos_file: default_todos_file(),
        }
    }
}

/// Search-related configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Number of content characters shown in a search snippet
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

fn default_snippet_chars() -> usize {
    150
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
        }
    }
}

const MAX_SNIPPET_CHARS: usize = 10_000;

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.search.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        validate_file_name(&self.notes_file, "storage.notes_file")?;
        validate_file_name(&self.todos_file, "storage.todos_file")?;
        if self.notes_file.trim() == self.todos_file.trim() {
            return Err(Error::InvalidConfig(format!(
                "storage.notes_file and storage.todos_file must differ (both '{}')",
                self.notes_file
            )));
        }
        Ok(())
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.snippet_chars == 0 {
            return Err(Error::InvalidConfig(
                "search.snippet_chars must be > 0".to_string(),
            ));
        }
        if self.snippet_chars > MAX_SNIPPET_CHARS {
            return Err(Error::InvalidConfig(format!(
                "search.snippet_chars must be <= {MAX_SNIPPET_CHARS}"
            )));
        }
        Ok(())
    }
}

fn validate_file_name(name: &str, field: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(Error::InvalidConfig(format!(
            "{field}: '{name}' must be a plain file name"
        )));
    }
    if trimmed == CONFIG_FILE {
        return Err(Error::InvalidConfig(format!(
            "{field} cannot reuse the config file name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.storage.notes_file, "notes.json");
        assert_eq!(cfg.storage.todos_file, "todos.json");
        assert_eq!(cfg.search.snippet_chars, 150);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".notebook.toml");
        let content = r#"
[storage]
notes_file = "journal.json"
todos_file = "chores.json"

[search]
snippet_chars = 40
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.storage.notes_file, "journal.json");
        assert_eq!(cfg.storage.todos_file, "chores.json");
        assert_eq!(cfg.search.snippet_chars, 40);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".notebook.toml");
        fs::write(&path, "[search]\nsnippet_chars = 80").expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.storage.notes_file, "notes.json");
        assert_eq!(cfg.search.snippet_chars, 80);
    }

    #[test]
    fn same_file_for_both_stores_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".notebook.toml");
        let content = r#"
[storage]
notes_file = "data.json"
todos_file = "data.json"
"#;
        fs::write(&path, content.trim()).expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_path_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".notebook.toml");
        fs::write(&path, "[storage]\nnotes_file = \"sub/notes.json\"").expect("write config");

        assert!(matches!(
            Config::load(&path),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_snippet_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".notebook.toml");
        fs::write(&path, "[search]\nsnippet_chars = 0").expect("write config");

        assert!(matches!(
            Config::load(&path),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path()).expect("defaults");
        assert_eq!(cfg.storage.notes_file, "notes.json");
    }

    #[test]
    fn load_from_dir_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(".notebook.toml"),
            "[storage]\ntodos_file = \"tasks.json\"",
        )
        .expect("write config");

        let cfg = Config::load_from_dir(dir.path()).expect("load config");
        assert_eq!(cfg.storage.todos_file, "tasks.json");
    }
}
