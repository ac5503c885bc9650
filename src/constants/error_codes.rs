//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const CODE_INVALID_PATH: &str = "INVALID_PATH";

// Task errors
pub const CODE_TASK_NOT_FOUND: &str = "TASK_NOT_FOUND";
pub const CODE_TASK_EXISTS: &str = "TASK_EXISTS";
pub const CODE_INVALID_TASK_ID: &str = "INVALID_TASK_ID";

// File errors
pub const CODE_INVALID_FILE_TYPE: &str = "INVALID_FILE_TYPE";
pub const CODE_FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
pub const CODE_FILE_UPLOAD_FAILED: &str = "FILE_UPLOAD_FAILED";

// Store errors
pub const CODE_STORE_CORRUPT: &str = "STORE_CORRUPT";

// Mail errors
pub const CODE_MAIL_NOT_CONFIGURED: &str = "MAIL_NOT_CONFIGURED";
pub const CODE_MAIL_FAILED: &str = "MAIL_FAILED";

// Generic errors
pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
