//! To-do list for notebook.
//!
//! Tasks are an ordered JSON array in `todos.json`. The positional API
//! (`mark_done`, `delete`) addresses tasks by their current index, the way a
//! list selection does; out-of-range indices are ignored. Each task also
//! carries a stable id so callers holding on to a task across mutations can
//! use `mark_done_ids` / `delete_ids` instead.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};
use crate::storage;

fn new_task_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "new_task_id")]
    pub id: String,
    #[serde(rename = "task")]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: new_task_id(),
            description: description.into(),
            done: false,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { "x" } else { " " };
        write!(f, "[{mark}] {}", self.description)
    }
}

/// File-backed to-do list; every mutation rewrites the to-do file
#[derive(Debug, Clone)]
pub struct TaskList {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskList {
    /// Open the list at `path`, starting empty when the file is absent
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks = storage::load_json(&path, Vec::new())?;
        Ok(Self { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a new, not-done task
    pub fn add(&mut self, description: &str) -> Result<&Task> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Validation("Enter a task.".to_string()));
        }

        let mut next = self.tasks.clone();
        next.push(Task::new(description));
        self.commit(next)?;
        let idx = self.tasks.len() - 1;
        tracing::debug!(index = idx, "task added");
        Ok(&self.tasks[idx])
    }

    /// Mark every in-range index done. Returns how many indices applied.
    pub fn mark_done(&mut self, indices: &[usize]) -> Result<usize> {
        let mut next = self.tasks.clone();
        let mut applied = 0;
        for &idx in indices {
            if let Some(task) = next.get_mut(idx) {
                task.done = true;
                applied += 1;
            }
        }
        self.commit(next)?;
        tracing::debug!(requested = indices.len(), applied, "tasks marked done");
        Ok(applied)
    }

    /// Remove the tasks at `indices`. Returns the removed tasks in list order.
    pub fn delete(&mut self, indices: &[usize]) -> Result<Vec<Task>> {
        let unique: BTreeSet<usize> = indices.iter().copied().collect();
        let mut next = self.tasks.clone();
        let mut removed = Vec::new();
        // Highest index first so the remaining indices stay valid.
        for &idx in unique.iter().rev() {
            if idx < next.len() {
                removed.push(next.remove(idx));
            }
        }
        removed.reverse();
        self.commit(next)?;
        tracing::debug!(requested = indices.len(), removed = removed.len(), "tasks deleted");
        Ok(removed)
    }

    /// Mark the tasks with the given ids done; unknown ids are ignored
    pub fn mark_done_ids(&mut self, ids: &[&str]) -> Result<usize> {
        let wanted: HashSet<&str> = ids.iter().copied().collect();
        let mut next = self.tasks.clone();
        let mut applied = 0;
        for task in next.iter_mut() {
            if wanted.contains(task.id.as_str()) {
                task.done = true;
                applied += 1;
            }
        }
        self.commit(next)?;
        Ok(applied)
    }

    /// Remove the tasks with the given ids; unknown ids are ignored
    pub fn delete_ids(&mut self, ids: &[&str]) -> Result<Vec<Task>> {
        let wanted: HashSet<&str> = ids.iter().copied().collect();
        let (removed, kept): (Vec<Task>, Vec<Task>) = self
            .tasks
            .iter()
            .cloned()
            .partition(|task| wanted.contains(task.id.as_str()));
        self.commit(kept)?;
        Ok(removed)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Write `tasks` to disk, then make them the current list
    fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        storage::save_json(&self.path, &tasks)?;
        self.tasks = tasks;
        Ok(())
    }
}
