//! Services organized by domain concern.

pub mod file_service;
pub mod mail_service;
pub mod reminder_service;
pub mod settings_service;
pub mod task_service;
pub mod template_service;

pub use file_service::FileService;
#[cfg(test)]
pub use mail_service::testing;
pub use mail_service::{EmailAttachment, Mailer, OutgoingEmail, SmtpMailer, UnconfiguredMailer};
pub use reminder_service::ReminderService;
pub use settings_service::SettingsService;
pub use task_service::TaskService;
pub use template_service::TemplateService;
