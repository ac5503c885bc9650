use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A job application tracked by the user.
///
/// Serialized in camelCase; every field except `id` and `title` tolerates being
/// absent so that documents written by older clients keep loading.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[schema(example = "1718029384756")]
    #[serde(default)]
    pub id: String,
    #[schema(example = "Spontaneous application")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = "TechVision")]
    pub company_name: String,
    #[serde(default)]
    #[schema(example = "www.techvision.fr")]
    pub company_website: String,
    #[serde(default)]
    #[schema(example = "Mme. Dubois")]
    pub contact_person: String,
    #[serde(default)]
    #[schema(example = "Alternance Data")]
    pub position: String,
    #[serde(default)]
    #[schema(example = "Paris")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    #[schema(example = json!(["hr@techvision.fr"]))]
    pub recipients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/uploads/applicant_cv_1718029384756.pdf")]
    pub cv_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_sent: Option<bool>,
}

impl Task {
    /// Whether an outreach email should go out for this task.
    pub fn is_reminder_eligible(&self) -> bool {
        !self.completed
            && self.reminder_enabled
            && !self.recipients.is_empty()
            && !self.reminder_sent.unwrap_or(false)
    }

    /// Status transition applied once the outreach email was accepted by the transport.
    pub fn mark_reminder_sent(&mut self) {
        self.completed = true;
        self.reminder_enabled = false;
        self.reminder_sent = Some(true);
    }
}
