//! On-demand reminder dispatch.

use actix_web::{web, HttpResponse};
use log::{info, warn};

use crate::constants::{CODE_INVALID_FORMAT, ERR_INVALID_JSON, MSG_REMINDERS_DISPATCHED};
use crate::errors::ApiError;
use crate::models::{ApiResponse, DispatchReport, DispatchRequest};
use crate::services::ReminderService;

/// Parse the optional dispatch filter. Only an empty body means "no filter".
fn parse_dispatch_request(body: &[u8]) -> Result<DispatchRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DispatchRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected dispatch request body: {}", e);
        ApiError::bad_request(CODE_INVALID_FORMAT, format!("{}: {}", ERR_INVALID_JSON, e))
    })
}

/// Send outreach emails now
///
/// Applies the same eligibility rules as the scheduler. Individual send
/// failures are listed in the report instead of failing the request.
#[utoipa::path(
    post,
    path = "/api/reminders/send",
    tag = "Reminders",
    request_body(content = DispatchRequest, description = "Optional task ID filter"),
    responses(
        (status = 200, description = "Dispatch report", body = DispatchReport),
        (status = 400, description = "Malformed filter", body = crate::models::ErrorResponse)
    )
)]
pub async fn send_reminders(
    reminder_service: web::Data<ReminderService>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let task_ids = parse_dispatch_request(&body)?.task_ids;
    info!("On-demand dispatch requested");

    let report = reminder_service.dispatch(task_ids.as_deref()).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_REMINDERS_DISPATCHED, report)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_means_no_filter() {
        assert_eq!(parse_dispatch_request(b"").unwrap().task_ids, None);
        assert_eq!(parse_dispatch_request(b" \n").unwrap().task_ids, None);
        assert_eq!(parse_dispatch_request(b"{}").unwrap().task_ids, None);
    }

    #[test]
    fn test_filter_is_parsed() {
        let req = parse_dispatch_request(br#"{"taskIds": ["2"]}"#).unwrap();
        assert_eq!(req.task_ids, Some(vec!["2".to_string()]));
    }

    #[test]
    fn test_malformed_filter_is_rejected() {
        let bodies: [&[u8]; 3] = [br#"{"taskIds": "2"}"#, b"{not json", b"null"];
        for body in bodies {
            let err = parse_dispatch_request(body).unwrap_err();
            assert_eq!(err.code(), CODE_INVALID_FORMAT);
        }
    }
}
