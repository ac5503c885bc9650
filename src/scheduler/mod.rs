//! Background loop that runs the outreach dispatch at the configured time of day.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike, Weekday};
use log::{debug, error, info};

use crate::models::{ReminderFrequency, ReminderSettings};
use crate::services::{ReminderService, SettingsService};
use crate::validators::parse_time_of_day;

/// Whether `frequency` admits `day`.
pub fn runs_on(settings: &ReminderSettings, day: Weekday) -> bool {
    match settings.frequency {
        ReminderFrequency::Daily | ReminderFrequency::Custom => true,
        ReminderFrequency::Weekdays => !matches!(day, Weekday::Sat | Weekday::Sun),
        ReminderFrequency::Weekly => day == Weekday::from(settings.weekly_day),
    }
}

/// Whether a dispatch is due at local time `now`.
///
/// Due when the hour and minute match `settings.time`, the frequency admits
/// today, and nothing fired yet on today's date.
pub fn is_due(
    settings: &ReminderSettings,
    now: NaiveDateTime,
    last_fired: Option<NaiveDate>,
) -> bool {
    if !settings.enabled || last_fired == Some(now.date()) {
        return false;
    }
    let Some(at) = parse_time_of_day(&settings.time) else {
        return false;
    };
    now.hour() == at.hour() && now.minute() == at.minute() && runs_on(settings, now.weekday())
}

pub struct ReminderScheduler {
    settings_service: Arc<SettingsService>,
    reminder_service: Arc<ReminderService>,
    interval: Duration,
    last_fired: Option<NaiveDate>,
}

impl ReminderScheduler {
    pub fn new(
        settings_service: Arc<SettingsService>,
        reminder_service: Arc<ReminderService>,
        interval_secs: u64,
    ) -> Self {
        Self {
            settings_service,
            reminder_service,
            interval: Duration::from_secs(interval_secs.max(1)),
            last_fired: None,
        }
    }

    /// Start the scheduler background loop.
    pub fn run(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Reminder scheduler started (checking every {}s)",
                self.interval.as_secs()
            );
            let mut interval = tokio::time::interval(self.interval);

            loop {
                interval.tick().await;
                self.tick(Local::now().naive_local()).await;
            }
        })
    }

    /// Check the settings once and dispatch when due. Returns whether it fired.
    pub async fn tick(&mut self, now: NaiveDateTime) -> bool {
        let Some(settings) = self.settings_service.current_settings() else {
            debug!("No reminder settings found, skipping tick");
            return false;
        };
        if !is_due(&settings, now, self.last_fired) {
            return false;
        }

        self.last_fired = Some(now.date());
        info!(
            "Scheduled dispatch at {} ({:?})",
            now.format("%Y-%m-%d %H:%M"),
            settings.frequency
        );

        let report = self.reminder_service.dispatch(None).await;
        info!(
            "Scheduled dispatch: {} eligible, {} sent, {} failed",
            report.eligible,
            report.sent.len(),
            report.failed.len()
        );

        if let Err(e) = self.reminder_service.send_summaries(&settings).await {
            error!("Failed to send summary emails: {}", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskRequest, WeeklyDay};
    use crate::repositories::{SettingsRepository, TaskRepository, TemplateRepository};
    use crate::services::testing::RecordingMailer;
    use crate::services::{FileService, TaskService, TemplateService};

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    fn settings(frequency: ReminderFrequency) -> ReminderSettings {
        ReminderSettings {
            frequency,
            time: "09:00".to_string(),
            ..Default::default()
        }
    }

    // 2025-03-03 is a Monday.

    #[test]
    fn test_exact_minute_match() {
        let daily = settings(ReminderFrequency::Daily);
        assert!(is_due(&daily, at("2025-03-03", "09:00"), None));
        assert!(!is_due(&daily, at("2025-03-03", "09:01"), None));
        assert!(!is_due(&daily, at("2025-03-03", "08:59"), None));
    }

    #[test]
    fn test_fires_once_per_day() {
        let daily = settings(ReminderFrequency::Daily);
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert!(!is_due(&daily, at("2025-03-03", "09:00"), Some(monday)));
        assert!(is_due(&daily, at("2025-03-04", "09:00"), Some(monday)));
    }

    #[test]
    fn test_frequency_rules() {
        let weekdays = settings(ReminderFrequency::Weekdays);
        assert!(is_due(&weekdays, at("2025-03-07", "09:00"), None));
        assert!(!is_due(&weekdays, at("2025-03-08", "09:00"), None));
        assert!(!is_due(&weekdays, at("2025-03-09", "09:00"), None));

        let mut weekly = settings(ReminderFrequency::Weekly);
        weekly.weekly_day = WeeklyDay::Wednesday;
        assert!(is_due(&weekly, at("2025-03-05", "09:00"), None));
        assert!(!is_due(&weekly, at("2025-03-03", "09:00"), None));

        let custom = settings(ReminderFrequency::Custom);
        assert!(is_due(&custom, at("2025-03-09", "09:00"), None));
    }

    #[test]
    fn test_disabled_or_bad_time_never_due() {
        let mut disabled = settings(ReminderFrequency::Daily);
        disabled.enabled = false;
        assert!(!is_due(&disabled, at("2025-03-03", "09:00"), None));

        let mut bad = settings(ReminderFrequency::Daily);
        bad.time = "nine".to_string();
        assert!(!is_due(&bad, at("2025-03-03", "09:00"), None));
    }

    #[tokio::test]
    async fn test_tick_dispatches_once() {
        let dir = tempfile::tempdir().unwrap();
        let files = Arc::new(FileService::with_data_dir(
            dir.path().to_path_buf(),
            "applicant",
        ));
        let tasks = Arc::new(TaskService::new(
            Arc::new(TaskRepository::new(dir.path().join("tasks.json"))),
            files.clone(),
        ));
        let settings_service = Arc::new(SettingsService::new(Arc::new(SettingsRepository::new(
            dir.path().join("settings/reminderSettings.json"),
        ))));
        let templates = Arc::new(TemplateService::new(Arc::new(TemplateRepository::new(
            dir.path().join("templates.json"),
        ))));
        let mailer = Arc::new(RecordingMailer::default());
        let reminders = Arc::new(ReminderService::new(
            tasks.clone(),
            settings_service.clone(),
            templates,
            files,
            mailer.clone(),
            None,
        ));

        tasks
            .add_task(TaskRequest {
                id: Some("1".to_string()),
                title: "Apply".to_string(),
                reminder_enabled: true,
                recipients: vec!["hr@acme.com".to_string()],
                ..Default::default()
            })
            .unwrap();

        let mut scheduler = ReminderScheduler::new(settings_service.clone(), reminders, 60);

        // No settings file yet.
        assert!(!scheduler.tick(at("2025-03-03", "09:00")).await);

        settings_service
            .save_settings(&settings(ReminderFrequency::Daily))
            .unwrap();
        assert!(!scheduler.tick(at("2025-03-03", "08:59")).await);
        assert!(scheduler.tick(at("2025-03-03", "09:00")).await);
        assert!(!scheduler.tick(at("2025-03-03", "09:00")).await);

        // One outreach email; no summaries without summary recipients.
        assert_eq!(mailer.sent().len(), 1);
        assert!(tasks.get_task("1").unwrap().completed);
    }
}
