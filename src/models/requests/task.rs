//! Task-related request models.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Task;
use crate::validators::{validate_not_blank, validate_recipients, validate_task_id};

/// Request payload for creating or replacing a task.
///
/// Also used element-wise for the bulk replace / import endpoints, which is why
/// the bookkeeping fields (`cvPath`, `reminderSent`) are accepted here.
#[derive(Debug, Deserialize, Validate, ToSchema, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    /// Optional client-chosen ID; generated when absent or blank
    #[validate(custom(function = "validate_task_id"))]
    #[schema(example = "1718029384756")]
    pub id: Option<String>,
    /// Short title (1-200 characters)
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Spontaneous application")]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Company name must be at most 200 characters"))]
    #[schema(example = "TechVision")]
    pub company_name: String,
    #[serde(default)]
    #[validate(length(max = 300, message = "Company website must be at most 300 characters"))]
    #[schema(example = "www.techvision.fr")]
    pub company_website: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Contact person must be at most 200 characters"))]
    #[schema(example = "Mme. Dubois")]
    pub contact_person: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Position must be at most 200 characters"))]
    #[schema(example = "Alternance Data")]
    pub position: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    #[schema(example = "Paris")]
    pub location: String,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub reminder_enabled: bool,
    /// Email addresses the outreach email is sent to
    #[serde(default)]
    #[validate(custom(function = "validate_recipients"))]
    #[schema(example = json!(["hr@techvision.fr"]))]
    pub recipients: Vec<String>,
    pub cv_path: Option<String>,
    pub reminder_sent: Option<bool>,
}

impl TaskRequest {
    /// Trimmed client ID, if one was supplied.
    pub fn requested_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            company_name: self.company_name.trim().to_string(),
            company_website: self.company_website.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            position: self.position.trim().to_string(),
            location: self.location.trim().to_string(),
            due_date: self.due_date,
            completed: self.completed,
            reminder_enabled: self.reminder_enabled,
            recipients: self
                .recipients
                .into_iter()
                .map(|r| r.trim().to_string())
                .collect(),
            cv_path: self.cv_path,
            reminder_sent: self.reminder_sent,
        }
    }
}

/// Multipart form accepted by the CV upload endpoint (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CvUploadForm {
    /// PDF, DOC, or DOCX file, at most 10MB
    #[schema(value_type = String, format = Binary)]
    pub cv: Vec<u8>,
}
