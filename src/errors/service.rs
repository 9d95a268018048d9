use thiserror::Error;
use validator::ValidationErrors;

use super::RepositoryError;

/// Error type for shortening service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// No active record matched the lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store failed; `message` names the operation that did not happen
    #[error("{message}: {source}")]
    Persistence {
        message: String,
        #[source]
        source: RepositoryError,
    },
}

impl ServiceError {
    pub fn persistence(message: impl Into<String>, source: RepositoryError) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        // Callers get one stable message, not the whole error map
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());
        Self::Validation(message)
    }
}
