use chrono::Weekday;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::{validate_relative_path, validate_time_of_day};

/// How often the scheduler fires at the configured time of day.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    #[default]
    Daily,
    Weekdays,
    Weekly,
    /// Kept for documents written by the settings page; behaves like `Daily`.
    Custom,
}

/// Day used by the `weekly` frequency.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyDay {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<WeeklyDay> for Weekday {
    fn from(day: WeeklyDay) -> Self {
        match day {
            WeeklyDay::Monday => Weekday::Mon,
            WeeklyDay::Tuesday => Weekday::Tue,
            WeeklyDay::Wednesday => Weekday::Wed,
            WeeklyDay::Thursday => Weekday::Thu,
            WeeklyDay::Friday => Weekday::Fri,
            WeeklyDay::Saturday => Weekday::Sat,
            WeeklyDay::Sunday => Weekday::Sun,
        }
    }
}

/// Person who receives summaries (and Cc copies when they are a manager).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate, ToSchema)]
pub struct SettingsRecipient {
    #[validate(email(message = "Recipients must be valid email addresses"))]
    #[schema(example = "manager@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Jane Smith")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "manager")]
    pub role: String,
}

impl SettingsRecipient {
    pub fn is_manager(&self) -> bool {
        self.role.eq_ignore_ascii_case("manager")
    }
}

/// File attached to every outreach email, path relative to the data directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate, ToSchema)]
pub struct AttachmentConfig {
    #[validate(length(min = 1, message = "Attachment name is required"))]
    #[schema(example = "Lettre de motivation.pdf")]
    pub name: String,
    #[validate(custom(function = "validate_relative_path"))]
    #[schema(example = "uploads/cover_letter.pdf")]
    pub path: String,
}

/// Contents of `settings/reminderSettings.json`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub frequency: ReminderFrequency,
    #[serde(default)]
    pub weekly_day: WeeklyDay,
    /// Time of day, `HH:MM`.
    #[serde(default = "default_time")]
    #[validate(custom(function = "validate_time_of_day"))]
    #[schema(example = "09:00")]
    pub time: String,
    #[serde(default = "default_true")]
    pub send_to_task_owner: bool,
    #[serde(default)]
    pub cc_managers: bool,
    #[serde(default = "default_true")]
    pub send_completed_summary: bool,
    #[serde(default = "default_true")]
    pub send_pending_summary: bool,
    #[serde(default)]
    #[validate(nested)]
    pub recipients: Vec<SettingsRecipient>,
    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<AttachmentConfig>,
}

fn default_true() -> bool {
    true
}

fn default_time() -> String {
    "09:00".to_string()
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: ReminderFrequency::Daily,
            weekly_day: WeeklyDay::Monday,
            time: default_time(),
            send_to_task_owner: true,
            cc_managers: false,
            send_completed_summary: true,
            send_pending_summary: true,
            recipients: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

impl ReminderSettings {
    /// Addresses copied on outreach emails when `ccManagers` is on.
    pub fn manager_emails(&self) -> Vec<String> {
        if !self.cc_managers {
            return Vec::new();
        }
        self.recipients
            .iter()
            .filter(|r| r.is_manager())
            .map(|r| r.email.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_document_parses() {
        let json = r#"{
            "enabled": true,
            "frequency": "weekdays",
            "time": "08:30",
            "sendToTaskOwner": true,
            "ccManagers": true,
            "sendCompletedSummary": false,
            "sendPendingSummary": true,
            "recipients": [
                {"email": "user@example.com", "name": "John Doe", "role": "Task Owner"},
                {"email": "manager@example.com", "name": "Jane Smith", "role": "manager"}
            ]
        }"#;
        let settings: ReminderSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.frequency, ReminderFrequency::Weekdays);
        assert_eq!(settings.weekly_day, WeeklyDay::Monday);
        assert!(settings.attachments.is_empty());
        assert_eq!(settings.manager_emails(), vec!["manager@example.com"]);
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let settings: ReminderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ReminderSettings::default());
    }

    #[test]
    fn test_managers_not_copied_unless_enabled() {
        let settings = ReminderSettings {
            recipients: vec![SettingsRecipient {
                email: "boss@example.com".to_string(),
                name: "Boss".to_string(),
                role: "Manager".to_string(),
            }],
            ..Default::default()
        };
        assert!(settings.manager_emails().is_empty());
    }
}
