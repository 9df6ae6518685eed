//! Error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    BadRequest(String),
    NotFound(String),

    // Resources not loaded at startup
    ModelNotLoaded,
    DataNotLoaded,

    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::ModelNotLoaded => (
                StatusCode::NOT_FOUND,
                "Model not loaded. Please train a model first.",
            ),
            AppError::DataNotLoaded => (
                StatusCode::NOT_FOUND,
                "Data not available. Please ensure the dataset exists.",
            ),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<crate::Error> for AppError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::UnknownFactor(_)
            | crate::Error::InvalidParameter(_)
            | crate::Error::DimensionMismatch { .. } => AppError::BadRequest(err.to_string()),
            other => AppError::InternalError(other.to_string()),
        }
    }
}
