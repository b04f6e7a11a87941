//! Error responses.
//!
//! Every handler error is rendered as `{"error": CODE, "message": text}`
//! with the status reported by the domain or repository error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use caixa_core::conditional::ConditionalError;
use caixa_core::payment::PaymentError;
use caixa_core::schedule::ScheduleError;
use caixa_core::stock::MovementError;
use caixa_core::trade::TradeError;
use caixa_db::repositories::{
    ConditionalRepoError, CostCenterError, LedgerError, StockError, TradeRepoError,
};
use caixa_shared::AppError;

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Builds an error from a raw status and code.
    #[must_use]
    pub fn new(status: u16, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code,
            message: message.into(),
        }
    }

    /// Resource not found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "NOT_FOUND", message)
    }

    /// Bad request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "VALIDATION_ERROR", message)
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self::new(e.status_code(), e.error_code(), e.to_string())
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        error!(error = %e, "Database error");
        Self::from(AppError::Database("An error occurred".to_string()))
    }
}

/// Domain errors carry their own status and code.
macro_rules! domain_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(e: $ty) -> Self {
                    Self::new(e.status_code(), e.error_code(), e.to_string())
                }
            }
        )+
    };
}

domain_error!(
    ScheduleError,
    PaymentError,
    MovementError,
    TradeError,
    ConditionalError,
);

impl From<StockError> for ApiError {
    fn from(e: StockError) -> Self {
        match e {
            StockError::ProductNotFound(_) => Self::new(404, "PRODUCT_NOT_FOUND", e.to_string()),
            StockError::Movement(e) => e.into(),
            StockError::Database(e) => e.into(),
        }
    }
}

impl From<TradeRepoError> for ApiError {
    fn from(e: TradeRepoError) -> Self {
        match e {
            TradeRepoError::NotFound(..) => Self::not_found(e.to_string()),
            TradeRepoError::Validation(e) => e.into(),
            TradeRepoError::Stock(e) => e.into(),
            TradeRepoError::Database(e) => e.into(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound(_) => Self::not_found(e.to_string()),
            LedgerError::Schedule(e) => e.into(),
            LedgerError::Payment(e) => e.into(),
            LedgerError::Database(e) => e.into(),
        }
    }
}

impl From<ConditionalRepoError> for ApiError {
    fn from(e: ConditionalRepoError) -> Self {
        match e {
            ConditionalRepoError::NotFound(_) => Self::not_found(e.to_string()),
            ConditionalRepoError::Rule(e) => e.into(),
            ConditionalRepoError::Stock(e) => e.into(),
            ConditionalRepoError::Database(e) => e.into(),
        }
    }
}

impl From<CostCenterError> for ApiError {
    fn from(e: CostCenterError) -> Self {
        match e {
            CostCenterError::InvalidName => Self::new(400, "INVALID_NAME", e.to_string()),
            CostCenterError::NotFound(_) => Self::not_found(e.to_string()),
            CostCenterError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caixa_shared::types::LedgerEntryId;

    #[test]
    fn test_domain_status_is_kept() {
        let err = ApiError::from(TradeRepoError::Validation(TradeError::NoLines));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "NO_LINES");
    }

    #[test]
    fn test_not_found_mapping() {
        let err = ApiError::from(LedgerError::NotFound(LedgerEntryId::new()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = ApiError::from(DbErr::Custom("secret".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secret"));
    }
}
