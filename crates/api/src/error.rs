//! API error types with HTTP response mapping.
//!
//! Error responses carry a status code and an empty body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, OrderError};
use order_store::OrderStoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input.
    BadRequest(String),
    /// Domain or store error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "rejected request");
            }
            ApiError::Domain(err) if status.is_server_error() => {
                tracing::error!(status = status.as_u16(), error = %err, "request failed");
            }
            ApiError::Domain(err) => {
                tracing::warn!(status = status.as_u16(), error = %err, "request failed");
            }
        }

        status.into_response()
    }
}

/// Maps an error to the status code returned for it.
pub fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ApiError::Domain(err) => domain_status(err),
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } | DomainError::Store(OrderStoreError::NotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        DomainError::Order(
            OrderError::InvalidTotalAmount { .. } | OrderError::TotalAmountOutOfRange { .. },
        ) => StatusCode::BAD_REQUEST,
        DomainError::Order(OrderError::InvalidStateTransition { .. })
        | DomainError::Store(OrderStoreError::ConcurrencyConflict { .. }) => StatusCode::CONFLICT,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Domain(DomainError::Order(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
