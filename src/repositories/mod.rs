//! Repository layer for the JSON documents on disk.
//!
//! This module provides a clean separation between business logic (services)
//! and file access (repositories).

pub mod json_document;
pub mod settings_repository;
pub mod task_repository;
pub mod template_repository;

pub use json_document::JsonDocument;
pub use settings_repository::SettingsRepository;
pub use task_repository::TaskRepository;
pub use template_repository::TemplateRepository;
