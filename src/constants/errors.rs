//! Error message constants used throughout the application.

// Task errors
pub const ERR_TASK_NOT_FOUND: &str = "Task not found";
pub const ERR_TASK_EXISTS: &str = "A task with this ID already exists";
pub const ERR_DUPLICATE_TASK_IDS: &str = "Task IDs must be unique";
pub const ERR_INVALID_TASK_ID: &str =
    "Task ID can only contain letters, numbers, underscores, and hyphens";
pub const ERR_BLANK_TITLE: &str = "Title must not be blank";
pub const ERR_TASKS_FILE_CORRUPT: &str =
    "Tasks file could not be parsed; refusing to overwrite it";

// Validation errors
pub const ERR_INVALID_JSON: &str = "Request body is not valid JSON for this endpoint";
pub const ERR_INVALID_TIME: &str = "Time must be in HH:MM (24h) format";
pub const ERR_INVALID_RECIPIENT: &str = "Recipients must be valid email addresses";
pub const ERR_INVALID_ATTACHMENT_PATH: &str =
    "Attachment paths must be relative and must not contain '..'";

// File errors
pub const ERR_INVALID_FILE_TYPE: &str = "Invalid file type. Only PDF, DOC, and DOCX are allowed.";
pub const ERR_FILE_TOO_LARGE: &str = "File too large. Maximum size is 10MB.";
pub const ERR_NO_CV_FILE: &str = "No CV file provided. Please upload a file with field name 'cv'.";
pub const ERR_FAILED_PROCESS_UPLOAD: &str = "Failed to process upload";
pub const ERR_FAILED_READ_FILE: &str = "Failed to read file data";
pub const ERR_FAILED_SAVE_FILE: &str = "Failed to save file";
pub const ERR_ATTACHMENT_MISSING: &str = "Attachment file not found";

// Mail errors
pub const ERR_MAIL_NOT_CONFIGURED: &str = "SMTP transport is not configured (set SMTP_HOST)";
pub const ERR_INVALID_MAIL_ADDRESS: &str = "Invalid mail address";
pub const ERR_MAIL_BUILD_FAILED: &str = "Failed to build email message";
