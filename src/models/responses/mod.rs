//! Response models for API endpoints.

pub mod api;
pub mod reminder;
pub mod task;

pub use api::*;
pub use reminder::*;
pub use task::*;
