//! HTTP request handlers organized by domain.

pub mod cv_handler;
pub mod reminder_handler;
pub mod settings_handler;
pub mod task_handler;
pub mod template_handler;

pub use cv_handler::*;
pub use reminder_handler::*;
pub use settings_handler::*;
pub use task_handler::*;
pub use template_handler::*;
