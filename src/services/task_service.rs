//! Task service for CRUD operations, bulk replacement, and reminder bookkeeping.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::constants::{
    CODE_BAD_REQUEST, CODE_TASK_EXISTS, CODE_TASK_NOT_FOUND, ERR_DUPLICATE_TASK_IDS,
    ERR_TASK_EXISTS, ERR_TASK_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{Task, TaskRequest};
use crate::repositories::TaskRepository;
use crate::services::FileService;

pub struct TaskService {
    repository: Arc<TaskRepository>,
    file_service: Arc<FileService>,
}

fn task_not_found() -> ApiError {
    ApiError::not_found(CODE_TASK_NOT_FOUND, ERR_TASK_NOT_FOUND)
}

fn new_task_id() -> String {
    Uuid::new_v4().to_string()
}

impl TaskService {
    pub fn new(repository: Arc<TaskRepository>, file_service: Arc<FileService>) -> Self {
        Self {
            repository,
            file_service,
        }
    }

    pub fn list_tasks(&self) -> Vec<Task> {
        self.repository.find_all()
    }

    pub fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        debug!("Fetching task by ID: {}", id);
        self.repository.find_by_id(id).ok_or_else(task_not_found)
    }

    /// Add a task. A blank ID is replaced by a fresh UUID.
    pub fn add_task(&self, req: TaskRequest) -> Result<Task, ApiError> {
        let id = req
            .requested_id()
            .map(str::to_string)
            .unwrap_or_else(new_task_id);
        let task = req.into_task(id);

        if !self.repository.insert(task.clone())? {
            warn!("Add failed: task {} already exists", task.id);
            return Err(ApiError::conflict(CODE_TASK_EXISTS, ERR_TASK_EXISTS));
        }

        info!("Created task {} ({})", task.id, task.title);
        Ok(task)
    }

    /// Replace a single task. The path ID wins over any ID in the body.
    ///
    /// `cvPath` and `reminderSent` are managed elsewhere, so they keep their
    /// stored values when the body omits them.
    pub fn update_task(&self, id: &str, req: TaskRequest) -> Result<Task, ApiError> {
        let mut task = req.into_task(id.to_string());

        self.repository.update_with(|tasks| {
            let slot = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(task_not_found)?;

            if task.cv_path.is_none() {
                task.cv_path = slot.cv_path.clone();
            }
            if task.reminder_sent.is_none() {
                task.reminder_sent = slot.reminder_sent;
            }
            *slot = task.clone();
            Ok(())
        })?;

        info!("Updated task {}", id);
        Ok(task)
    }

    /// Delete a task and its CV file.
    pub fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let removed = self.repository.delete(id)?.ok_or_else(task_not_found)?;

        if let Some(ref cv_path) = removed.cv_path {
            self.file_service.delete_file(cv_path);
        }
        info!("Deleted task {}", id);
        Ok(())
    }

    /// Overwrite the whole task list (bulk save and import).
    pub fn replace_all(&self, requests: Vec<TaskRequest>) -> Result<usize, ApiError> {
        let tasks: Vec<Task> = requests
            .into_iter()
            .map(|req| {
                let id = req
                    .requested_id()
                    .map(str::to_string)
                    .unwrap_or_else(new_task_id);
                req.into_task(id)
            })
            .collect();

        let unique = {
            let mut seen = HashSet::new();
            tasks.iter().all(|t| seen.insert(t.id.as_str()))
        };
        if !unique {
            return Err(ApiError::bad_request(CODE_BAD_REQUEST, ERR_DUPLICATE_TASK_IDS));
        }

        let count = self.repository.replace_all(tasks)?;
        info!("Replaced task list ({} tasks)", count);
        Ok(count)
    }

    /// Clear the `reminderSent` flag on every task.
    pub fn reset_reminder_status(&self) -> Result<usize, ApiError> {
        let count = self.repository.update_with(|tasks| {
            for task in tasks.iter_mut() {
                task.reminder_sent = Some(false);
            }
            Ok(tasks.len())
        })?;
        info!("Reset reminderSent status for {} tasks", count);
        Ok(count)
    }

    /// Set or clear the task's CV path, returning the updated task and the previous path.
    pub fn set_cv_path(
        &self,
        id: &str,
        cv_path: Option<String>,
    ) -> Result<(Task, Option<String>), ApiError> {
        self.repository.update_with(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(task_not_found)?;
            let previous = std::mem::replace(&mut task.cv_path, cv_path);
            Ok((task.clone(), previous))
        })
    }

    /// Apply the post-send transition to the stored copy of a task.
    ///
    /// Re-reads the store so edits made while the email was in flight survive.
    pub fn mark_reminder_sent(&self, id: &str) -> Result<bool, ApiError> {
        self.repository.update_with(|tasks| {
            Ok(match tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => {
                    task.mark_reminder_sent();
                    true
                }
                None => false,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, TaskService) {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(TaskRepository::new(dir.path().join("tasks.json")));
        let files = Arc::new(FileService::with_data_dir(
            dir.path().to_path_buf(),
            "applicant",
        ));
        (dir, TaskService::new(repository, files))
    }

    fn request(id: Option<&str>, title: &str) -> TaskRequest {
        TaskRequest {
            id: id.map(str::to_string),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_generates_id_and_rejects_duplicates() {
        let (_dir, service) = service();

        let generated = service.add_task(request(None, "Acme")).unwrap();
        assert!(Uuid::parse_str(&generated.id).is_ok());

        service.add_task(request(Some("42"), "Globex")).unwrap();
        let err = service.add_task(request(Some("42"), "Again")).unwrap_err();
        assert_eq!(err.code(), CODE_TASK_EXISTS);
        assert_eq!(service.list_tasks().len(), 2);
    }

    #[test]
    fn test_update_keeps_managed_fields() {
        let (_dir, service) = service();
        service.add_task(request(Some("1"), "Acme")).unwrap();
        service
            .set_cv_path("1", Some("/uploads/applicant_cv_1.pdf".to_string()))
            .unwrap();
        service.mark_reminder_sent("1").unwrap();

        let updated = service
            .update_task("1", request(Some("ignored"), "Acme (2nd round)"))
            .unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.title, "Acme (2nd round)");
        assert_eq!(updated.cv_path.as_deref(), Some("/uploads/applicant_cv_1.pdf"));
        assert_eq!(updated.reminder_sent, Some(true));
        assert_eq!(service.get_task("1").unwrap(), updated);
    }

    #[test]
    fn test_missing_tasks_are_not_found() {
        let (_dir, service) = service();
        assert_eq!(service.get_task("x").unwrap_err().code(), CODE_TASK_NOT_FOUND);
        assert_eq!(
            service.update_task("x", request(None, "t")).unwrap_err().code(),
            CODE_TASK_NOT_FOUND
        );
        assert_eq!(service.delete_task("x").unwrap_err().code(), CODE_TASK_NOT_FOUND);
    }

    #[test]
    fn test_delete_removes_cv_file() {
        let (dir, service) = service();
        let uploads = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::write(uploads.join("applicant_cv_1.pdf"), b"%PDF").unwrap();

        service.add_task(request(Some("1"), "Acme")).unwrap();
        service
            .set_cv_path("1", Some("/uploads/applicant_cv_1.pdf".to_string()))
            .unwrap();
        service.delete_task("1").unwrap();

        assert!(service.list_tasks().is_empty());
        assert!(!uploads.join("applicant_cv_1.pdf").exists());
    }

    #[test]
    fn test_replace_all_and_reset() {
        let (_dir, service) = service();
        service.add_task(request(Some("old"), "Old")).unwrap();

        let mut sent = request(Some("a"), "A");
        sent.reminder_sent = Some(true);
        let count = service
            .replace_all(vec![sent, request(None, "B")])
            .unwrap();
        assert_eq!(count, 2);
        assert!(service.get_task("old").is_err());
        assert_eq!(service.get_task("a").unwrap().reminder_sent, Some(true));

        assert_eq!(service.reset_reminder_status().unwrap(), 2);
        assert!(service
            .list_tasks()
            .iter()
            .all(|t| t.reminder_sent == Some(false)));
    }

    #[test]
    fn test_replace_all_rejects_duplicate_ids() {
        let (_dir, service) = service();
        service.add_task(request(Some("keep"), "Keep")).unwrap();

        let err = service
            .replace_all(vec![request(Some("1"), "A"), request(Some("1"), "B")])
            .unwrap_err();
        assert_eq!(err.code(), CODE_BAD_REQUEST);
        assert!(service.get_task("keep").is_ok());
    }
}
