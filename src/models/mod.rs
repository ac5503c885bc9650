//! Data models organized by type.

pub mod requests;
pub mod responses;
pub mod settings;
pub mod task;
pub mod template;

pub use requests::*;
pub use responses::*;
pub use settings::*;
pub use task::*;
pub use template::*;
