//! Email template repository backed by `templates.json`.

use std::path::PathBuf;

use log::error;

use crate::errors::ApiError;
use crate::models::EmailTemplate;
use crate::repositories::JsonDocument;

pub struct TemplateRepository {
    document: JsonDocument<EmailTemplate>,
}

impl TemplateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }

    /// Saved template, or an empty one when nothing usable is stored.
    pub fn load(&self) -> EmailTemplate {
        match self.document.load() {
            Ok(template) => template.unwrap_or_default(),
            Err(e) => {
                error!("Error reading templates: {}", e);
                EmailTemplate::default()
            }
        }
    }

    pub fn save(&self, template: &EmailTemplate) -> Result<(), ApiError> {
        self.document.save(template)
    }
}
