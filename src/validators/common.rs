//! Common validation utilities and helpers.

use std::path::{Component, Path};

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::constants::{
    CODE_FILE_TOO_LARGE, CODE_INVALID_FILE_TYPE, ERR_FILE_TOO_LARGE, ERR_INVALID_ATTACHMENT_PATH,
    ERR_INVALID_FILE_TYPE,
};
use crate::errors::ApiError;

/// Allowed content types for CV uploads, with the extension used on disk.
pub const ALLOWED_CV_TYPES: [(&str, &str); 3] = [
    ("application/pdf", "pdf"),
    ("application/msword", "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
];

/// Maximum file size for CV uploads (10MB).
pub const MAX_CV_SIZE: usize = 10 * 1024 * 1024;

/// Convert validator errors to ApiError::ValidationError.
///
/// Nested struct and list errors are flattened so that every message ends up
/// in the response.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors = Vec::new();
    collect_messages(&e, &mut errors);
    ApiError::validation(errors)
}

fn collect_messages(e: &ValidationErrors, out: &mut Vec<String>) {
    for kind in e.errors().values() {
        match kind {
            ValidationErrorsKind::Field(errs) => out.extend(
                errs.iter()
                    .map(|err| err.message.clone().unwrap_or_default().to_string()),
            ),
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_messages(inner, out);
                }
            }
        }
    }
}

/// Validate CV content type.
///
/// Returns the file extension to store the upload under.
pub fn validate_cv_content_type(content_type: Option<&str>) -> Result<&'static str, ApiError> {
    content_type
        .and_then(|ct| {
            ALLOWED_CV_TYPES
                .iter()
                .find(|(allowed, _)| ct.starts_with(allowed))
                .map(|(_, ext)| *ext)
        })
        .ok_or_else(|| ApiError::bad_request(CODE_INVALID_FILE_TYPE, ERR_INVALID_FILE_TYPE))
}

/// Validate CV file size.
pub fn validate_cv_size(size: usize) -> Result<(), ApiError> {
    if size > MAX_CV_SIZE {
        return Err(ApiError::bad_request(CODE_FILE_TOO_LARGE, ERR_FILE_TOO_LARGE));
    }
    Ok(())
}

/// Whether `path` stays inside the directory it is joined onto.
pub fn is_safe_relative_path(path: &str) -> bool {
    let trimmed = path.trim_start_matches('/');
    !trimmed.is_empty()
        && Path::new(trimmed)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Custom validator for attachment paths configured in the settings.
pub fn validate_relative_path(path: &str) -> Result<(), ValidationError> {
    if is_safe_relative_path(path) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_path");
        error.message = Some(ERR_INVALID_ATTACHMENT_PATH.into());
        Err(error)
    }
}
