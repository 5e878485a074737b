//! API error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Fixed detail returned for every internal failure
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body: `{"detail": ..., "type": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, detail: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                detail: detail.into(),
                error_type,
            },
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Every domain failure is an opaque 500; the cause is only logged
impl From<DomainError> for ApiError {
    fn from(_: DomainError) -> Self {
        Self::internal(INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.error_type, self.response.detail)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            "Invalid JSON syntax",
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(err.response.detail, "Invalid JSON syntax");
    }

    #[test]
    fn test_domain_errors_are_opaque() {
        for domain_err in [
            DomainError::storage("password authentication failed for user \"postgres\""),
            DomainError::cache("Connection refused (os error 111)"),
            DomainError::serialization("expected value at line 1 column 1"),
            DomainError::configuration("Unknown cache backend"),
        ] {
            let api_err: ApiError = domain_err.into();

            assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.response.detail, INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.response.error_type, ApiErrorType::ServerError);
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::internal(INTERNAL_SERVER_ERROR);
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"detail": "Internal server error", "type": "server_error"})
        );
    }

    #[test]
    fn test_all_error_types() {
        assert_eq!(ApiError::not_found("").status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("").status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
