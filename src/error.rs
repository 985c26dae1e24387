use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// The two failure kinds the API distinguishes. Bad rating values inside
/// individual stored records are not errors; they are skipped during
/// aggregation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidArgument(message.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidArgument(message) => {
                HttpResponse::BadRequest().json(json!({ "error": message }))
            }
            // Details are already logged at the store layer; the client gets
            // a generic body.
            AppError::StorageUnavailable(_) => {
                HttpResponse::InternalServerError().json(json!({ "error": "storage unavailable" }))
            }
        }
    }
}
