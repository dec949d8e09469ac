use thiserror::Error;

/// Unified error type for the catalog console.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// HTTP status the error corresponds to. Transport-level failures have none
    /// of their own and map to 502.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 404,
            CatalogError::Status { status, .. } => *status,
            CatalogError::Http(_) => 502,
            CatalogError::Form(_) => 400,
            _ => 500,
        }
    }

    /// True for errors raised before anything reached the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            CatalogError::Form(_) | CatalogError::Config(_) | CatalogError::Serde(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_keep_backend_code() {
        let err = CatalogError::Status {
            status: 409,
            message: "conflict".into(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.to_string(), "Backend returned 409: conflict");
        assert!(!err.is_local());
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(CatalogError::NotFound("microservice 7".into()).status_code(), 404);
    }

    #[test]
    fn form_errors_are_local() {
        let err = CatalogError::Form("name: expected string".into());
        assert!(err.is_local());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn serde_error_converts() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CatalogError = e.into();
        assert!(matches!(err, CatalogError::Serde(_)));
        assert_eq!(err.status_code(), 500);
    }
}
