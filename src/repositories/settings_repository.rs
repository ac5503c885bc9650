//! Reminder settings repository backed by `settings/reminderSettings.json`.

use std::path::PathBuf;

use log::{error, info};

use crate::errors::ApiError;
use crate::models::ReminderSettings;
use crate::repositories::JsonDocument;

pub struct SettingsRepository {
    document: JsonDocument<ReminderSettings>,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }

    /// Read the settings, writing the defaults first when the file is missing.
    pub fn load_or_init(&self) -> Result<ReminderSettings, ApiError> {
        if !self.document.path().exists() {
            info!(
                "Creating default reminder settings at {}",
                self.document.path().display()
            );
            let defaults = ReminderSettings::default();
            self.document.save(&defaults)?;
            return Ok(defaults);
        }

        Ok(self.document.load()?.unwrap_or_default())
    }

    /// Read the settings without creating anything; `None` when unavailable.
    pub fn find(&self) -> Option<ReminderSettings> {
        match self.document.load() {
            Ok(settings) => settings,
            Err(e) => {
                error!("Error reading reminder settings: {}", e);
                None
            }
        }
    }

    pub fn save(&self, settings: &ReminderSettings) -> Result<(), ApiError> {
        self.document.save(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_init_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings/reminderSettings.json");
        let repo = SettingsRepository::new(&path);

        assert!(repo.find().is_none());
        let settings = repo.load_or_init().unwrap();
        assert_eq!(settings, ReminderSettings::default());
        assert!(path.exists());
        assert_eq!(repo.find(), Some(ReminderSettings::default()));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminderSettings.json");
        std::fs::write(&path, "").unwrap();

        let repo = SettingsRepository::new(&path);
        assert_eq!(repo.load_or_init().unwrap(), ReminderSettings::default());
    }
}
