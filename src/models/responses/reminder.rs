//! Reminder dispatch response models.

use serde::Serialize;
use utoipa::ToSchema;

/// A task whose email could not be sent
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchFailure {
    pub task_id: String,
    pub error: String,
}

/// Outcome of one pass over the eligible tasks
#[derive(Debug, Serialize, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    /// Tasks that qualified for an email
    pub eligible: usize,
    /// IDs of tasks emailed and marked as sent
    pub sent: Vec<String>,
    /// Tasks whose email failed; they are left untouched
    pub failed: Vec<DispatchFailure>,
}
