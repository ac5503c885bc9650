//! Task-related response models.

use serde::Serialize;
use utoipa::ToSchema;

/// Result of a bulk replace or import
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplaceTasksResponse {
    /// Number of tasks now stored
    #[schema(example = 12)]
    pub count: usize,
}

/// Result of clearing the `reminderSent` flag everywhere
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetRemindersResponse {
    /// Number of tasks touched
    pub reset: usize,
}

/// Result of a CV upload
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvUploadResponse {
    /// Public path of the stored CV
    #[schema(example = "/uploads/applicant_cv_1718029384756.pdf")]
    pub file_path: String,
}
