//! Note store for notebook.
//!
//! Notes are a title -> content mapping persisted as a single JSON object.
//! Titles are unique; saving under an existing title replaces its content
//! and keeps its position. Iteration follows insertion order, both in memory
//! and in the file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::storage;

/// A single note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub content: String,
}

/// Insertion-ordered, title-unique note collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    entries: Vec<Note>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|note| note.title == title)
    }

    /// Insert or overwrite. Returns `true` when the title was new.
    pub fn insert(&mut self, title: impl Into<String>, content: impl Into<String>) -> bool {
        let title = title.into();
        let content = content.into();
        match self.position(&title) {
            Some(idx) => {
                self.entries[idx].content = content;
                false
            }
            None => {
                self.entries.push(Note { title, content });
                true
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.position(title)
            .map(|idx| self.entries[idx].content.as_str())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn remove(&mut self, title: &str) -> Option<Note> {
        self.position(title).map(|idx| self.entries.remove(idx))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|note| note.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Notes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for note in &self.entries {
            map.serialize_entry(&note.title, &note.content)?;
        }
        map.end()
    }
}

struct NotesVisitor;

impl<'de> Visitor<'de> for NotesVisitor {
    type Value = Notes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping note titles to content")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Notes, A::Error> {
        let mut notes = Notes::new();
        while let Some((title, content)) = access.next_entry::<String, String>()? {
            notes.insert(title, content);
        }
        Ok(notes)
    }
}

impl<'de> Deserialize<'de> for Notes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(NotesVisitor)
    }
}

/// File-backed note store; every mutation rewrites the notes file
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
    notes: Notes,
}

impl NoteStore {
    /// Open the store at `path`, starting empty when the file is absent
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let notes = storage::load_json(&path, Notes::new())?;
        Ok(Self { path, notes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    /// Save `content` under `title`, replacing any existing note of that title
    pub fn put(&mut self, title: &str, content: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("Enter a note title.".to_string()));
        }

        let mut next = self.notes.clone();
        let created = next.insert(title, content);
        self.commit(next)?;
        tracing::debug!(title, created, "note saved");
        Ok(())
    }

    pub fn get(&self, title: &str) -> Result<&str> {
        let title = title.trim();
        self.notes
            .get(title)
            .ok_or_else(|| Error::NoteNotFound(title.to_string()))
    }

    pub fn delete(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        let mut next = self.notes.clone();
        if next.remove(title).is_none() {
            return Err(Error::NoteNotFound(title.to_string()));
        }
        self.commit(next)?;
        tracing::debug!(title, "note deleted");
        Ok(())
    }

    /// Titles in insertion order
    pub fn list(&self) -> Vec<&str> {
        self.notes.titles().collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Write `notes` to disk, then make them the current state
    fn commit(&mut self, notes: Notes) -> Result<()> {
        storage::save_json(&self.path, &notes)?;
        self.notes = notes;
        Ok(())
    }
}
