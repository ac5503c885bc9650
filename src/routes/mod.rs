use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::handlers;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| ApiError::from(err).into()),
    )
    .service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            .route("/openapi.json", web::get().to(openapi_json))
            // Task routes
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(handlers::get_tasks))
                    .route("", web::post().to(handlers::create_task))
                    // Bulk replace of the whole list
                    .route("", web::put().to(handlers::replace_all_tasks))
                    // Static paths must be before /{id} to avoid conflict
                    .route("/import", web::post().to(handlers::import_tasks))
                    .route(
                        "/reset-reminders",
                        web::post().to(handlers::reset_reminders),
                    )
                    .route("/{id}", web::get().to(handlers::get_task))
                    .route("/{id}", web::put().to(handlers::update_task))
                    .route("/{id}", web::delete().to(handlers::delete_task))
                    .route("/{id}/cv", web::post().to(handlers::upload_cv))
                    .route("/{id}/cv", web::delete().to(handlers::delete_cv)),
            )
            // Reminder settings
            .service(
                web::scope("/settings")
                    .route("", web::get().to(handlers::get_settings))
                    .route("", web::put().to(handlers::update_settings)),
            )
            // Outreach template
            .service(
                web::scope("/templates")
                    .route("", web::get().to(handlers::get_template))
                    .route("", web::put().to(handlers::update_template))
                    .route("/preview", web::post().to(handlers::preview_template)),
            )
            // On-demand dispatch
            .route("/reminders/send", web::post().to(handlers::send_reminders)),
    );
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
