//! Small helpers shared across layers.

pub mod log_sanitizer;

pub use log_sanitizer::{mask_email, mask_recipients};
