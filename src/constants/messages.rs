//! Success message constants used throughout the application.

// Task messages
pub const MSG_TASKS_RETRIEVED: &str = "Tasks retrieved";
pub const MSG_TASK_FOUND: &str = "Task found";
pub const MSG_TASK_CREATED: &str = "Task created successfully";
pub const MSG_TASK_UPDATED: &str = "Task updated successfully";
pub const MSG_TASK_DELETED: &str = "Task deleted successfully";
pub const MSG_TASKS_REPLACED: &str = "All tasks updated successfully";
pub const MSG_TASKS_IMPORTED: &str = "Tasks imported successfully";
pub const MSG_REMINDERS_RESET: &str = "Reminder status reset for all tasks";

// CV messages
pub const MSG_CV_UPLOADED: &str = "CV uploaded successfully";
pub const MSG_CV_DELETED: &str = "CV deleted successfully";

// Settings & templates
pub const MSG_SETTINGS_RETRIEVED: &str = "Reminder settings";
pub const MSG_SETTINGS_SAVED: &str = "Settings saved successfully";
pub const MSG_TEMPLATE_RETRIEVED: &str = "Email template";
pub const MSG_TEMPLATE_SAVED: &str = "Template saved successfully";
pub const MSG_TEMPLATE_PREVIEW: &str = "Template preview";

// Reminders
pub const MSG_REMINDERS_DISPATCHED: &str = "Job inquiry emails processed";
