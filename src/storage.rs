//! Storage layer for notebook
//!
//! All state lives in flat JSON files inside a single data directory:
//!
//! ```text
//! <data dir>/
//!   .notebook.toml    # Optional configuration
//!   notes.json        # Object mapping note title -> content
//!   todos.json        # Array of {"id", "task", "done"} records
//! ```
//!
//! Every save rewrites the whole file. Loading a file that does not exist
//! yields the caller's default and leaves the filesystem untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{Error, Result};

/// Name of the optional configuration file in the data directory
pub const CONFIG_FILE: &str = ".notebook.toml";

/// Resolved locations of the notebook data files
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
    notes_file: PathBuf,
    todos_file: PathBuf,
}

impl Storage {
    /// Create storage rooted at `data_dir`, naming files per `config`
    pub fn new(data_dir: PathBuf, config: &Config) -> Self {
        let notes_file = data_dir.join(&config.storage.notes_file);
        let todos_file = data_dir.join(&config.storage.todos_file);
        Self {
            data_dir,
            notes_file,
            todos_file,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the notes file
    pub fn notes_file(&self) -> &Path {
        &self.notes_file
    }

    /// Path to the to-do file
    pub fn todos_file(&self) -> &Path {
        &self.todos_file
    }
}

/// Load JSON data from `path`, or return `default` when the file is absent.
///
/// A file that exists but does not parse is reported as [`Error::Parse`].
pub fn load_json<T: DeserializeOwned>(path: &Path, default: T) -> Result<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "data file missing, using default");
        return Ok(default);
    }

    let content = fs::read_to_string(path)?;
    let data = serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded data file");
    Ok(data)
}

/// Serialize `data` as pretty JSON and replace `path` with it.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    write_atomic(path, json.as_bytes())?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "saved data file");
    Ok(())
}

/// Write data using temp file + rename so the target is either the old or
/// the new contents, never a partial write.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut temp = NamedTempFile::new_in(&parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;

    Ok(())
}
