//! Reminder settings handlers.

use actix_web::{web, HttpResponse};

use crate::constants::{MSG_SETTINGS_RETRIEVED, MSG_SETTINGS_SAVED};
use crate::errors::ApiError;
use crate::models::{ApiResponse, ReminderSettings};
use crate::services::SettingsService;

/// Read the reminder settings
///
/// The defaults are written on first access.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Current settings", body = ReminderSettings)
    )
)]
pub async fn get_settings(
    settings_service: web::Data<SettingsService>,
) -> Result<HttpResponse, ApiError> {
    let settings = settings_service.get_settings()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_SETTINGS_RETRIEVED, settings)))
}

/// Save the reminder settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = ReminderSettings,
    responses(
        (status = 200, description = "Settings saved", body = ReminderSettings),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_settings(
    settings_service: web::Data<SettingsService>,
    body: web::Json<ReminderSettings>,
) -> Result<HttpResponse, ApiError> {
    let settings = body.into_inner();
    settings_service.save_settings(&settings)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_SETTINGS_SAVED, settings)))
}
