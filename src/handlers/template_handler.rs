//! Email template handlers.

use actix_web::{web, HttpResponse};

use crate::constants::{MSG_TEMPLATE_PREVIEW, MSG_TEMPLATE_RETRIEVED, MSG_TEMPLATE_SAVED};
use crate::errors::ApiError;
use crate::models::{ApiResponse, EmailTemplate, RenderedEmail, TemplatePreviewRequest};
use crate::services::{TaskService, TemplateService};

/// Read the saved outreach template
#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "Templates",
    responses(
        (status = 200, description = "Saved template (empty parts use the built-in)", body = EmailTemplate)
    )
)]
pub async fn get_template(
    template_service: web::Data<TemplateService>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_TEMPLATE_RETRIEVED,
        template_service.get_template(),
    )))
}

/// Save the outreach template
#[utoipa::path(
    put,
    path = "/api/templates",
    tag = "Templates",
    request_body = EmailTemplate,
    responses(
        (status = 200, description = "Template saved", body = EmailTemplate)
    )
)]
pub async fn update_template(
    template_service: web::Data<TemplateService>,
    body: web::Json<EmailTemplate>,
) -> Result<HttpResponse, ApiError> {
    let template = body.into_inner();
    template_service.save_template(&template)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TEMPLATE_SAVED, template)))
}

/// Render a template preview
///
/// Uses the given template or the saved one, applied to the task named by
/// `taskId`, the inline `task`, or built-in sample data.
#[utoipa::path(
    post,
    path = "/api/templates/preview",
    tag = "Templates",
    request_body = TemplatePreviewRequest,
    responses(
        (status = 200, description = "Rendered subject and body", body = RenderedEmail),
        (status = 404, description = "Task not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn preview_template(
    template_service: web::Data<TemplateService>,
    task_service: web::Data<TaskService>,
    body: web::Json<TemplatePreviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    let task = match req.task_id {
        Some(ref id) => Some(task_service.get_task(id)?),
        None => req.task,
    };

    let rendered = template_service.preview(req.template, task);
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_TEMPLATE_PREVIEW, rendered)))
}
