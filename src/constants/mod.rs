//! Application constants module.
//!
//! This module centralizes all constant strings used throughout the application,
//! including error codes, error messages, and success messages.

pub mod error_codes;
pub mod errors;
pub mod messages;

pub use error_codes::*;
pub use errors::*;
pub use messages::*;
