//! Reminder dispatch and template preview request models.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{EmailTemplate, Task};

/// Request payload for an on-demand dispatch.
#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    /// Restrict the dispatch to these task IDs (eligibility still applies)
    #[schema(example = json!(["1718029384756"]))]
    pub task_ids: Option<Vec<String>>,
}

/// Request payload for rendering a template preview.
///
/// The template defaults to the saved one; the data comes from `taskId`,
/// then `task`, then built-in sample data.
#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreviewRequest {
    pub template: Option<EmailTemplate>,
    pub task_id: Option<String>,
    pub task: Option<Task>,
}
