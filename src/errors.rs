use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::services::text_extract::ExtractError;

/// Message returned to the client for every failure past validation.
pub const ANALYSIS_FAILED: &str = "Failed to analyze resume.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("{0:#}")]
    ExternalService(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFileType { .. } => AppError::UnsupportedFormat(err.to_string()),
            other => AppError::ExternalService(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: msg.clone(),
                        details: None,
                    },
                )
            }
            AppError::UnsupportedFormat(msg) => {
                tracing::error!("Analysis failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: ANALYSIS_FAILED.to_string(),
                        details: Some(msg.clone()),
                    },
                )
            }
            AppError::ExternalService(e) => {
                tracing::error!("Analysis failed: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: ANALYSIS_FAILED.to_string(),
                        details: Some(format!("{e:#}")),
                    },
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
