use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_service::ServiceError;
use thiserror::Error;

/// Failure answered to the browser. Bodies are fixed strings; details only
/// go to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("item not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Item Not Found."),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server Error"),
        };

        (status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err.status_hint() {
            404 => ApiError::NotFound,
            _ => ApiError::Internal,
        }
    }
}
