use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use newscheck::ErrorBody;

use crate::provider::ProviderError;

pub const PARSE_FAILURE_DETAIL: &str =
    "Failed to parse the response from the AI model. The model may have returned an invalid format.";

/// Error half of every handler: renders `{"detail": ...}` with a status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unparseable_model_output() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, PARSE_FAILURE_DETAIL)
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::MissingApiKey => Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ProviderError::Upstream(msg) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Error communicating with Perplexity API: {msg}"),
            ),
            ProviderError::MissingContent => Self::unparseable_model_output(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
