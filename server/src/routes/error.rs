//! Handler errors and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::google::GoogleError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Google(#[from] GoogleError),
    #[error("OAuth not configured. Set GOOGLE_CLIENT_ID/SECRET.")]
    OAuthNotConfigured,
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Google(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OAuthNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
