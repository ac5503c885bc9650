//! CV upload and deletion handlers.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::{info, warn};

use crate::constants::{CODE_INVALID_TASK_ID, ERR_INVALID_TASK_ID, MSG_CV_DELETED, MSG_CV_UPLOADED};
use crate::errors::ApiError;
use crate::models::{ApiResponse, CvUploadForm, CvUploadResponse, Task};
use crate::services::{FileService, TaskService};
use crate::validators::is_valid_task_id;

/// Upload the CV attached to a task's outreach email
///
/// Accepts PDF, DOC, and DOCX files up to 10MB in the multipart field `cv`.
/// The task's previous CV is removed.
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/cv",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body(
        content = CvUploadForm,
        content_type = "multipart/form-data",
        description = "CV file in field `cv`"
    ),
    responses(
        (status = 200, description = "CV uploaded successfully", body = CvUploadResponse),
        (status = 400, description = "Invalid file type or size", body = crate::models::ErrorResponse),
        (status = 404, description = "Task not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn upload_cv(
    task_service: web::Data<TaskService>,
    file_service: web::Data<FileService>,
    path: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();

    if !is_valid_task_id(&task_id) {
        warn!("Rejected CV upload for unsafe task ID");
        return Err(ApiError::bad_request(CODE_INVALID_TASK_ID, ERR_INVALID_TASK_ID));
    }

    // Fail before reading the upload when the task does not exist.
    task_service.get_task(&task_id)?;

    let file_path = file_service.save_cv(&task_id, &mut payload).await?;

    let previous = match task_service.set_cv_path(&task_id, Some(file_path.clone())) {
        Ok((_, previous)) => previous,
        Err(e) => {
            file_service.delete_file(&file_path);
            return Err(e);
        }
    };

    if let Some(ref old) = previous {
        if *old != file_path {
            file_service.delete_file(old);
        }
    }

    info!("Successfully uploaded CV for task: {}", task_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_CV_UPLOADED,
        CvUploadResponse { file_path },
    )))
}

/// Remove a task's CV
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}/cv",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "CV deleted successfully", body = Task),
        (status = 404, description = "Task not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn delete_cv(
    task_service: web::Data<TaskService>,
    file_service: web::Data<FileService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();

    let (task, previous) = task_service.set_cv_path(&task_id, None)?;
    if let Some(ref old) = previous {
        file_service.delete_file(old);
    }

    info!("Successfully deleted CV for task: {}", task_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_CV_DELETED, task)))
}
