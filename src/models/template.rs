use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User-edited outreach template stored in `templates.json`.
///
/// An empty `subject` or `body` means "use the built-in one".
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
pub struct EmailTemplate {
    #[serde(default)]
    #[schema(example = "Candidature spontanée - {{position}} - {{companyName}}")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "{{greeting}}\n\nJe me permets de vous contacter...")]
    pub body: String,
}

/// Subject and body after placeholder substitution.
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}
