pub mod types;

pub use types::Submission;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Repository URL and feature description are both required")]
    MissingField,

    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),
}

/// Trim and check the two form fields.
///
/// Both fields must be non-empty after trimming, and the URL must be absolute
/// with a scheme and an authority. Opaque forms such as `mailto:someone` parse
/// as URLs but are rejected here because they carry no host.
pub fn validate(url: &str, query: &str) -> Result<Submission, ValidationError> {
    let url = url.trim();
    let query = query.trim();

    if url.is_empty() || query.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let parsed = reqwest::Url::parse(url).map_err(|_| ValidationError::InvalidUrl(url.to_string()))?;
    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(ValidationError::InvalidUrl(url.to_string()));
    }

    Ok(Submission {
        repo_url: url.to_string(),
        feature_description: query.to_string(),
    })
}
