//! Task repository backed by `tasks.json`.
//!
//! The whole task list lives in one JSON array. Every mutation reads the
//! current array, applies a change, and writes the array back while holding
//! a process-wide lock, so the HTTP workers and the scheduler never interleave
//! their writes.

use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, error};

use crate::constants::{CODE_INTERNAL_ERROR, CODE_STORE_CORRUPT, ERR_TASKS_FILE_CORRUPT};
use crate::errors::ApiError;
use crate::models::Task;
use crate::repositories::JsonDocument;

/// Repository for task persistence.
pub struct TaskRepository {
    document: JsonDocument<Vec<Task>>,
    write_lock: Mutex<()>,
}

impl TaskRepository {
    /// Create a new TaskRepository for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
            write_lock: Mutex::new(()),
        }
    }

    /// Read every task.
    ///
    /// An unreadable file is logged and reported as an empty list.
    pub fn find_all(&self) -> Vec<Task> {
        match self.document.load() {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(e) => {
                error!(
                    "Error reading tasks from {}: {}",
                    self.document.path().display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Find a task by its ID.
    pub fn find_by_id(&self, id: &str) -> Option<Task> {
        debug!("Repository: Finding task by ID: {}", id);
        self.find_all().into_iter().find(|t| t.id == id)
    }

    /// Apply `change` to the stored list and persist the result.
    ///
    /// The closure's return value is passed through. When the closure fails
    /// nothing is written.
    pub fn update_with<R, F>(&self, change: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<R, ApiError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ApiError::internal(CODE_INTERNAL_ERROR, "Task store lock poisoned"))?;

        let mut tasks = self
            .document
            .load()
            .map_err(|e| {
                error!("Refusing to modify unreadable tasks file: {}", e);
                ApiError::internal(CODE_STORE_CORRUPT, ERR_TASKS_FILE_CORRUPT)
            })?
            .unwrap_or_default();

        let result = change(&mut tasks)?;
        self.document.save(&tasks)?;
        Ok(result)
    }

    /// Append a task unless its ID is already taken. Returns `false` on a clash.
    pub fn insert(&self, task: Task) -> Result<bool, ApiError> {
        debug!("Repository: Inserting task: {}", task.id);
        self.update_with(|tasks| {
            if tasks.iter().any(|t| t.id == task.id) {
                return Ok(false);
            }
            tasks.push(task);
            Ok(true)
        })
    }

    /// Remove a task by ID, returning it when it existed.
    pub fn delete(&self, id: &str) -> Result<Option<Task>, ApiError> {
        debug!("Repository: Deleting task: {}", id);
        self.update_with(|tasks| {
            let removed = tasks
                .iter()
                .position(|t| t.id == id)
                .map(|index| tasks.remove(index));
            Ok(removed)
        })
    }

    /// Overwrite the whole list.
    pub fn replace_all(&self, new_tasks: Vec<Task>) -> Result<usize, ApiError> {
        self.update_with(|tasks| {
            *tasks = new_tasks;
            Ok(tasks.len())
        })
    }
}
