//! Outreach dispatch and summary digests.

use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};

use crate::errors::ApiError;
use crate::models::{DispatchFailure, DispatchReport, ReminderSettings, Task};
use crate::services::{
    FileService, Mailer, OutgoingEmail, SettingsService, TaskService, TemplateService,
};
use crate::utils::mask_recipients;

pub struct ReminderService {
    task_service: Arc<TaskService>,
    settings_service: Arc<SettingsService>,
    template_service: Arc<TemplateService>,
    file_service: Arc<FileService>,
    mailer: Arc<dyn Mailer>,
    /// Sender address, added to summary recipients when `sendToTaskOwner` is on.
    owner_address: Option<String>,
}

impl ReminderService {
    pub fn new(
        task_service: Arc<TaskService>,
        settings_service: Arc<SettingsService>,
        template_service: Arc<TemplateService>,
        file_service: Arc<FileService>,
        mailer: Arc<dyn Mailer>,
        owner_address: Option<String>,
    ) -> Self {
        Self {
            task_service,
            settings_service,
            template_service,
            file_service,
            mailer,
            owner_address: owner_address.filter(|a| !a.trim().is_empty()),
        }
    }

    /// Send the outreach email of every eligible task, optionally limited to `only`.
    ///
    /// A failed send is logged and reported; the task is left as it was.
    pub async fn dispatch(&self, only: Option<&[String]>) -> DispatchReport {
        let settings = self.settings_service.current_settings().unwrap_or_default();

        let candidates: Vec<Task> = self
            .task_service
            .list_tasks()
            .into_iter()
            .filter(Task::is_reminder_eligible)
            .filter(|t| only.map_or(true, |ids| ids.iter().any(|id| *id == t.id)))
            .collect();

        let mut report = DispatchReport {
            eligible: candidates.len(),
            ..Default::default()
        };
        info!("Dispatching outreach emails for {} tasks", report.eligible);

        for task in candidates {
            match self.send_outreach(&task, &settings).await {
                Ok(()) => match self.task_service.mark_reminder_sent(&task.id) {
                    Ok(true) => {
                        info!("Outreach email sent for task {} ({})", task.id, task.company_name);
                        report.sent.push(task.id);
                    }
                    Ok(false) => {
                        warn!("Task {} was deleted while its email was in flight", task.id);
                        report.sent.push(task.id);
                    }
                    Err(e) => {
                        error!("Email sent but status not saved for task {}: {}", task.id, e);
                        report.failed.push(DispatchFailure {
                            task_id: task.id,
                            error: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    warn!(
                        "Failed to send outreach email for task {} ({}): {}",
                        task.id, task.company_name, e
                    );
                    report.failed.push(DispatchFailure {
                        task_id: task.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Dispatch finished: {} sent, {} failed",
            report.sent.len(),
            report.failed.len()
        );
        report
    }

    /// Build the outreach email for a task.
    pub fn build_outreach(
        &self,
        task: &Task,
        settings: &ReminderSettings,
    ) -> Result<OutgoingEmail, ApiError> {
        let rendered = self.template_service.render_for_task(task);

        let mut attachments = Vec::new();
        if let Some(ref cv_path) = task.cv_path {
            let name = Path::new(cv_path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("cv");
            attachments.push(self.file_service.read_attachment(name, cv_path)?);
        }
        for attachment in &settings.attachments {
            attachments.push(
                self.file_service
                    .read_attachment(&attachment.name, &attachment.path)?,
            );
        }

        Ok(OutgoingEmail {
            to: task.recipients.clone(),
            cc: settings.manager_emails(),
            subject: rendered.subject,
            body: rendered.body,
            attachments,
        })
    }

    async fn send_outreach(&self, task: &Task, settings: &ReminderSettings) -> Result<(), ApiError> {
        let email = self.build_outreach(task, settings)?;
        info!(
            "Sending outreach for task {} to {:?} with {} attachments",
            task.id,
            mask_recipients(&email.to),
            email.attachments.len()
        );
        self.mailer.send(email).await
    }

    /// Addresses that receive the summary digests.
    pub fn summary_recipients(&self, settings: &ReminderSettings) -> Vec<String> {
        let mut recipients: Vec<String> = Vec::new();
        let owner = self
            .owner_address
            .iter()
            .filter(|_| settings.send_to_task_owner);

        for address in settings.recipients.iter().map(|r| &r.email).chain(owner) {
            let address = address.trim();
            if !address.is_empty()
                && !recipients.iter().any(|r| r.eq_ignore_ascii_case(address))
            {
                recipients.push(address.to_string());
            }
        }
        recipients
    }

    /// Email the pending and/or completed digests, as enabled in `settings`.
    pub async fn send_summaries(&self, settings: &ReminderSettings) -> Result<(), ApiError> {
        let recipients = self.summary_recipients(settings);
        if recipients.is_empty() {
            return Ok(());
        }

        let tasks = self.task_service.list_tasks();
        let mut first_error = None;

        let digests = [
            (settings.send_pending_summary, "Pending applications", false),
            (settings.send_completed_summary, "Completed applications", true),
        ];
        for (enabled, heading, completed) in digests {
            if !enabled {
                continue;
            }
            let selected: Vec<&Task> = tasks.iter().filter(|t| t.completed == completed).collect();
            if let Err(e) = self.send_digest(&recipients, heading, &selected).await {
                error!("Failed to send {} summary: {}", heading, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn send_digest(
        &self,
        recipients: &[String],
        heading: &str,
        tasks: &[&Task],
    ) -> Result<(), ApiError> {
        let email = OutgoingEmail {
            to: recipients.to_vec(),
            subject: format!("{} ({})", heading, tasks.len()),
            body: summary_body(heading, tasks),
            ..Default::default()
        };
        self.mailer.send(email).await?;
        info!("{} summary sent to {} recipients", heading, recipients.len());
        Ok(())
    }
}

/// Plain-text digest listing one task per line.
pub fn summary_body(heading: &str, tasks: &[&Task]) -> String {
    let mut body = format!("{}: {}\n\n", heading, tasks.len());
    if tasks.is_empty() {
        body.push_str("Nothing to report.\n");
    }
    for task in tasks {
        body.push_str("- ");
        body.push_str(&task.title);
        if !task.company_name.is_empty() {
            body.push_str(&format!(" ({})", task.company_name));
        }
        if let Some(due) = task.due_date {
            body.push_str(&format!(", due {}", due.format("%Y-%m-%d")));
        }
        body.push('\n');
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttachmentConfig, SettingsRecipient, TaskRequest};
    use crate::repositories::{SettingsRepository, TaskRepository, TemplateRepository};
    use crate::services::testing::RecordingMailer;

    struct Fixture {
        dir: tempfile::TempDir,
        tasks: Arc<TaskService>,
        settings: Arc<SettingsService>,
        mailer: Arc<RecordingMailer>,
        service: ReminderService,
    }

    fn fixture(mailer: RecordingMailer) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let files = Arc::new(FileService::with_data_dir(
            dir.path().to_path_buf(),
            "applicant",
        ));
        let tasks = Arc::new(TaskService::new(
            Arc::new(TaskRepository::new(dir.path().join("tasks.json"))),
            files.clone(),
        ));
        let settings = Arc::new(SettingsService::new(Arc::new(SettingsRepository::new(
            dir.path().join("settings/reminderSettings.json"),
        ))));
        let templates = Arc::new(TemplateService::new(Arc::new(TemplateRepository::new(
            dir.path().join("templates.json"),
        ))));
        let mailer = Arc::new(mailer);

        let service = ReminderService::new(
            tasks.clone(),
            settings.clone(),
            templates,
            files,
            mailer.clone(),
            Some("me@example.com".to_string()),
        );
        Fixture {
            dir,
            tasks,
            settings,
            mailer,
            service,
        }
    }

    fn eligible(id: &str, recipient: &str) -> TaskRequest {
        TaskRequest {
            id: Some(id.to_string()),
            title: format!("Apply {}", id),
            company_name: "Acme".to_string(),
            reminder_enabled: true,
            recipients: vec![recipient.to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_and_marks_eligible_tasks() {
        let f = fixture(RecordingMailer::default());
        f.tasks.add_task(eligible("1", "hr@acme.com")).unwrap();
        let mut disabled = eligible("2", "hr@acme.com");
        disabled.reminder_enabled = false;
        f.tasks.add_task(disabled).unwrap();

        let report = f.service.dispatch(None).await;

        assert_eq!(report.eligible, 1);
        assert_eq!(report.sent, vec!["1"]);
        assert!(report.failed.is_empty());

        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["hr@acme.com"]);
        assert!(sent[0].subject.contains("Acme"));

        let task = f.tasks.get_task("1").unwrap();
        assert!(task.completed);
        assert!(!task.reminder_enabled);
        assert_eq!(task.reminder_sent, Some(true));

        // Nothing left on a second pass.
        assert_eq!(f.service.dispatch(None).await.eligible, 0);
    }

    #[tokio::test]
    async fn test_failed_send_leaves_task_untouched() {
        let f = fixture(RecordingMailer::failing_for("down@acme.com"));
        f.tasks.add_task(eligible("1", "down@acme.com")).unwrap();
        f.tasks.add_task(eligible("2", "hr@acme.com")).unwrap();

        let report = f.service.dispatch(None).await;

        assert_eq!(report.sent, vec!["2"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].task_id, "1");

        let task = f.tasks.get_task("1").unwrap();
        assert!(!task.completed);
        assert!(task.is_reminder_eligible());
    }

    #[tokio::test]
    async fn test_dispatch_selection() {
        let f = fixture(RecordingMailer::default());
        f.tasks.add_task(eligible("1", "a@acme.com")).unwrap();
        f.tasks.add_task(eligible("2", "b@acme.com")).unwrap();

        let report = f.service.dispatch(Some(&["2".to_string()])).await;
        assert_eq!(report.eligible, 1);
        assert_eq!(report.sent, vec!["2"]);
        assert!(f.tasks.get_task("1").unwrap().is_reminder_eligible());
    }

    #[tokio::test]
    async fn test_attachments_and_manager_cc() {
        let f = fixture(RecordingMailer::default());
        let uploads = f.dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::write(uploads.join("applicant_cv_1.pdf"), b"%PDF").unwrap();
        std::fs::write(uploads.join("letter.pdf"), b"%PDF").unwrap();

        f.settings
            .save_settings(&ReminderSettings {
                cc_managers: true,
                recipients: vec![SettingsRecipient {
                    email: "boss@example.com".to_string(),
                    name: "Boss".to_string(),
                    role: "manager".to_string(),
                }],
                attachments: vec![AttachmentConfig {
                    name: "Lettre de motivation.pdf".to_string(),
                    path: "uploads/letter.pdf".to_string(),
                }],
                ..Default::default()
            })
            .unwrap();

        f.tasks.add_task(eligible("1", "hr@acme.com")).unwrap();
        f.tasks
            .set_cv_path("1", Some("/uploads/applicant_cv_1.pdf".to_string()))
            .unwrap();

        let report = f.service.dispatch(None).await;
        assert_eq!(report.sent, vec!["1"]);

        let sent = f.mailer.sent();
        assert_eq!(sent[0].cc, vec!["boss@example.com"]);
        let names: Vec<&str> = sent[0]
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        assert_eq!(names, vec!["applicant_cv_1.pdf", "Lettre de motivation.pdf"]);
    }

    #[tokio::test]
    async fn test_missing_attachment_fails_the_task() {
        let f = fixture(RecordingMailer::default());
        f.tasks.add_task(eligible("1", "hr@acme.com")).unwrap();
        f.tasks
            .set_cv_path("1", Some("/uploads/gone.pdf".to_string()))
            .unwrap();

        let report = f.service.dispatch(None).await;
        assert_eq!(report.failed.len(), 1);
        assert!(f.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_summaries_go_to_recipients_and_owner() {
        let f = fixture(RecordingMailer::default());
        let mut done = eligible("1", "hr@acme.com");
        done.completed = true;
        f.tasks.add_task(done).unwrap();
        f.tasks.add_task(eligible("2", "hr@acme.com")).unwrap();

        let settings = ReminderSettings {
            recipients: vec![SettingsRecipient {
                email: "boss@example.com".to_string(),
                name: "Boss".to_string(),
                role: "manager".to_string(),
            }],
            ..Default::default()
        };
        f.service.send_summaries(&settings).await.unwrap();

        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["boss@example.com", "me@example.com"]);
        assert_eq!(sent[0].subject, "Pending applications (1)");
        assert!(sent[0].body.contains("- Apply 2 (Acme)"));
        assert_eq!(sent[1].subject, "Completed applications (1)");
    }

    #[tokio::test]
    async fn test_failed_pending_digest_still_sends_completed() {
        let f = fixture(RecordingMailer::failing_subject("Pending"));
        let mut done = eligible("1", "hr@acme.com");
        done.completed = true;
        f.tasks.add_task(done).unwrap();

        let result = f.service.send_summaries(&ReminderSettings::default()).await;

        assert!(result.is_err());
        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Completed applications (1)");
    }

    #[tokio::test]
    async fn test_no_summary_without_recipients() {
        let f = fixture(RecordingMailer::default());
        let settings = ReminderSettings {
            send_to_task_owner: false,
            ..Default::default()
        };
        f.service.send_summaries(&settings).await.unwrap();
        assert!(f.mailer.sent().is_empty());
    }
}
