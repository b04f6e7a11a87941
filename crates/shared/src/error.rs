//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Error kinds surfaced at the HTTP boundary.
///
/// Domain and repository errors are folded into one of these before they
/// leave the API layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any write happened.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation not allowed in the current state.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Builds an error from a status code produced by a domain error.
    ///
    /// Domain errors report their own status and code; this keeps the
    /// mapping in one place for the API layer.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            400 => Self::Validation(message),
            409 => Self::Conflict(message),
            422 => Self::BusinessRule(message),
            _ => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "UNAUTHORIZED")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::BusinessRule(String::new()), 422, "BUSINESS_RULE_VIOLATION")]
    #[case(AppError::Conflict(String::new()), 409, "CONFLICT")]
    #[case(AppError::Database(String::new()), 500, "DATABASE_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_from_status_round_trips_kind() {
        assert!(matches!(
            AppError::from_status(400, "x".into()),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from_status(422, "x".into()),
            AppError::BusinessRule(_)
        ));
        assert!(matches!(
            AppError::from_status(503, "x".into()),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("Fornecedor obrigatório".into()).to_string(),
            "Validation error: Fornecedor obrigatório"
        );
        assert_eq!(
            AppError::NotFound("product".into()).to_string(),
            "Not found: product"
        );
    }
}
