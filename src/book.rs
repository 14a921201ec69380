//! The notebook as a whole: configuration plus both stores, opened from one
//! data directory.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::notes::NoteStore;
use crate::search::{self, SearchOutcome};
use crate::storage::Storage;
use crate::todo::TaskList;

#[derive(Debug)]
pub struct Notebook {
    pub config: Config,
    pub storage: Storage,
    pub notes: NoteStore,
    pub tasks: TaskList,
}

impl Notebook {
    /// Load configuration and both collections from `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = Config::load_from_dir(&data_dir)?;
        let storage = Storage::new(data_dir, &config);
        let notes = NoteStore::open(storage.notes_file())?;
        let tasks = TaskList::open(storage.todos_file())?;
        tracing::debug!(
            dir = %storage.data_dir().display(),
            notes = notes.len(),
            tasks = tasks.len(),
            "notebook opened"
        );
        Ok(Self {
            config,
            storage,
            notes,
            tasks,
        })
    }

    /// Search notes using the configured snippet length
    pub fn search(&self, keyword: &str) -> Result<SearchOutcome> {
        search::search_with(self.notes.notes(), keyword, self.config.search.snippet_chars)
    }
}
