//! Reminder settings service.

use std::sync::Arc;

use log::info;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::ReminderSettings;
use crate::repositories::SettingsRepository;
use crate::validators::validation_errors_to_api_error;

pub struct SettingsService {
    repository: Arc<SettingsRepository>,
}

impl SettingsService {
    pub fn new(repository: Arc<SettingsRepository>) -> Self {
        Self { repository }
    }

    /// Current settings; the defaults are written to disk on first access.
    pub fn get_settings(&self) -> Result<ReminderSettings, ApiError> {
        self.repository.load_or_init()
    }

    /// Current settings without side effects, `None` when missing or unreadable.
    pub fn current_settings(&self) -> Option<ReminderSettings> {
        self.repository.find()
    }

    /// Validate and persist the settings.
    pub fn save_settings(&self, settings: &ReminderSettings) -> Result<(), ApiError> {
        settings.validate().map_err(validation_errors_to_api_error)?;
        self.repository.save(settings)?;
        info!(
            "Reminder settings saved (enabled: {}, {:?} at {})",
            settings.enabled, settings.frequency, settings.time
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttachmentConfig;

    fn service() -> (tempfile::TempDir, SettingsService) {
        let dir = tempfile::tempdir().unwrap();
        let repository = SettingsRepository::new(dir.path().join("settings/reminderSettings.json"));
        (dir, SettingsService::new(Arc::new(repository)))
    }

    #[test]
    fn test_get_creates_defaults_then_save_round_trips() {
        let (_dir, service) = service();
        assert!(service.current_settings().is_none());
        assert_eq!(service.get_settings().unwrap(), ReminderSettings::default());

        let settings = ReminderSettings {
            time: "18:45".to_string(),
            cc_managers: true,
            ..Default::default()
        };
        service.save_settings(&settings).unwrap();
        assert_eq!(service.current_settings(), Some(settings));
    }

    #[test]
    fn test_save_rejects_invalid_settings() {
        let (_dir, service) = service();

        let bad_time = ReminderSettings {
            time: "25:00".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            service.save_settings(&bad_time),
            Err(ApiError::ValidationError { .. })
        ));

        let traversal = ReminderSettings {
            attachments: vec![AttachmentConfig {
                name: "secret".to_string(),
                path: "../.env".to_string(),
            }],
            ..Default::default()
        };
        assert!(service.save_settings(&traversal).is_err());
        assert!(service.current_settings().is_none());
    }
}
