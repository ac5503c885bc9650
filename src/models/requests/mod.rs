//! Request models for API endpoints.

pub mod reminder;
pub mod task;

pub use reminder::*;
pub use task::*;
