//! Task handlers for CRUD operations, bulk replacement, and reminder resets.

use actix_web::{web, HttpResponse};
use log::{debug, info, warn};
use validator::Validate;

use crate::constants::{
    MSG_REMINDERS_RESET, MSG_TASKS_IMPORTED, MSG_TASKS_REPLACED, MSG_TASKS_RETRIEVED,
    MSG_TASK_CREATED, MSG_TASK_DELETED, MSG_TASK_FOUND, MSG_TASK_UPDATED,
};
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ReplaceTasksResponse, ResetRemindersResponse, Task, TaskRequest,
};
use crate::services::TaskService;
use crate::validators::validation_errors_to_api_error;

fn validate_task(req: &TaskRequest) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let err = validation_errors_to_api_error(e);
        warn!("Validation failed for task: {}", err);
        err
    })
}

/// List all tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Every stored task", body = [Task])
    )
)]
pub async fn get_tasks(task_service: web::Data<TaskService>) -> Result<HttpResponse, ApiError> {
    let tasks = task_service.list_tasks();
    debug!("Returning {} tasks", tasks.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TASKS_RETRIEVED, tasks)))
}

/// Get a specific task by ID
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, description = "Task not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_task(
    task_service: web::Data<TaskService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let task = task_service.get_task(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TASK_FOUND, task)))
}

/// Add a task
///
/// A missing or blank `id` is replaced by a generated UUID.
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 409, description = "Task ID already in use", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_task(
    task_service: web::Data<TaskService>,
    body: web::Json<TaskRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_task(&body)?;

    let task = task_service.add_task(body.into_inner())?;
    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_TASK_CREATED, task)))
}

/// Replace a single task
///
/// The path ID wins over any `id` in the body. `cvPath` and `reminderSent`
/// keep their stored values when omitted.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 404, description = "Task not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_task(
    task_service: web::Data<TaskService>,
    path: web::Path<String>,
    body: web::Json<TaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let task_id = path.into_inner();
    validate_task(&body)?;

    let task = task_service.update_task(&task_id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TASK_UPDATED, task)))
}

/// Delete a task and its CV
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn delete_task(
    task_service: web::Data<TaskService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    task_service.delete_task(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_TASK_DELETED)))
}

fn replace_tasks(
    task_service: &TaskService,
    requests: Vec<TaskRequest>,
) -> Result<ReplaceTasksResponse, ApiError> {
    for req in &requests {
        validate_task(req)?;
    }
    let count = task_service.replace_all(requests)?;
    Ok(ReplaceTasksResponse { count })
}

/// Replace the whole task list
#[utoipa::path(
    put,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = [TaskRequest],
    responses(
        (status = 200, description = "Task list replaced", body = ReplaceTasksResponse),
        (status = 400, description = "Validation error or duplicate IDs", body = crate::models::ErrorResponse)
    )
)]
pub async fn replace_all_tasks(
    task_service: web::Data<TaskService>,
    body: web::Json<Vec<TaskRequest>>,
) -> Result<HttpResponse, ApiError> {
    let response = replace_tasks(&task_service, body.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TASKS_REPLACED, response)))
}

/// Import a task list, replacing the stored one
#[utoipa::path(
    post,
    path = "/api/tasks/import",
    tag = "Tasks",
    request_body = [TaskRequest],
    responses(
        (status = 200, description = "Tasks imported", body = ReplaceTasksResponse),
        (status = 400, description = "Validation error or duplicate IDs", body = crate::models::ErrorResponse)
    )
)]
pub async fn import_tasks(
    task_service: web::Data<TaskService>,
    body: web::Json<Vec<TaskRequest>>,
) -> Result<HttpResponse, ApiError> {
    let requests = body.into_inner();
    info!("Importing {} tasks", requests.len());
    let response = replace_tasks(&task_service, requests)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TASKS_IMPORTED, response)))
}

/// Clear `reminderSent` on every task
#[utoipa::path(
    post,
    path = "/api/tasks/reset-reminders",
    tag = "Tasks",
    responses(
        (status = 200, description = "Reminder status reset", body = ResetRemindersResponse)
    )
)]
pub async fn reset_reminders(
    task_service: web::Data<TaskService>,
) -> Result<HttpResponse, ApiError> {
    let reset = task_service.reset_reminder_status()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_REMINDERS_RESET,
        ResetRemindersResponse { reset },
    )))
}
