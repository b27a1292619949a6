//! Site error type.

use circulate_content::ContentError;

use crate::template::TemplateError;

/// Error returned when a request cannot be dispatched.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Content could not be scanned or the resolved document could not be read.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// The selected template failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Settings could not be converted into template data.
    #[error("Failed to build template context: {0}")]
    Context(#[from] serde_json::Error),
}
