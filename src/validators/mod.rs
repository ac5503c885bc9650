//! Input validation helpers shared by request models and services.

pub mod common;
pub mod settings;
pub mod task;

pub use common::*;
pub use settings::*;
pub use task::*;
