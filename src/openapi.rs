use utoipa::OpenApi;

use crate::models::{
    AttachmentConfig, CvUploadForm, CvUploadResponse, DispatchFailure, DispatchReport, DispatchRequest,
    EmailTemplate, ErrorResponse, HealthResponse, ReminderFrequency, ReminderSettings,
    RenderedEmail, ReplaceTasksResponse, ResetRemindersResponse, SettingsRecipient, Task,
    TaskRequest, TemplatePreviewRequest, WeeklyDay,
};

/// OpenAPI documentation for the Job Tracker API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Tracker API",
        version = "1.0.0",
        description = "REST API for tracking job applications, sending outreach emails with CV attachments, and scheduling reminder dispatches.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Tasks", description = "Job application tasks (CRUD, bulk replace, import, CV upload)"),
        (name = "Settings", description = "Reminder scheduling settings"),
        (name = "Templates", description = "Outreach email template and preview"),
        (name = "Reminders", description = "On-demand outreach dispatch")
    ),
    paths(
        crate::handlers::get_tasks,
        crate::handlers::create_task,
        crate::handlers::replace_all_tasks,
        crate::handlers::import_tasks,
        crate::handlers::reset_reminders,
        crate::handlers::get_task,
        crate::handlers::update_task,
        crate::handlers::delete_task,
        crate::handlers::upload_cv,
        crate::handlers::delete_cv,
        crate::handlers::get_settings,
        crate::handlers::update_settings,
        crate::handlers::get_template,
        crate::handlers::update_template,
        crate::handlers::preview_template,
        crate::handlers::send_reminders,
        crate::routes::health_check
    ),
    components(
        schemas(
            Task,
            TaskRequest,
            ReplaceTasksResponse,
            ResetRemindersResponse,
            CvUploadForm,
            CvUploadResponse,
            ReminderSettings,
            ReminderFrequency,
            WeeklyDay,
            SettingsRecipient,
            AttachmentConfig,
            EmailTemplate,
            RenderedEmail,
            TemplatePreviewRequest,
            DispatchRequest,
            DispatchReport,
            DispatchFailure,
            ErrorResponse,
            HealthResponse
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/tasks",
            "/api/tasks/import",
            "/api/tasks/reset-reminders",
            "/api/tasks/{id}",
            "/api/tasks/{id}/cv",
            "/api/settings",
            "/api/templates",
            "/api/templates/preview",
            "/api/reminders/send",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_cv_upload_documents_multipart_body() {
        let doc = ApiDoc::openapi();
        let upload = doc.paths.paths["/api/tasks/{id}/cv"]
            .operations
            .get(&utoipa::openapi::PathItemType::Post)
            .expect("upload operation");
        let body = upload.request_body.as_ref().expect("request body");
        assert!(body.content.contains_key("multipart/form-data"));

        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("CvUploadForm"));
    }
}
