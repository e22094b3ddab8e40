//! Mapping of handler failures onto HTTP responses

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_application::SubmitQuestionError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A handler failure on its way out as `{"detail"}`.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was not a valid chat request.
    Body(JsonRejection),
    /// The question could not be answered.
    Question(SubmitQuestionError),
}

impl From<SubmitQuestionError> for ApiError {
    fn from(e: SubmitQuestionError) -> Self {
        Self::Question(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let e = match self {
            ApiError::Body(rejection) => return rejection.status(),
            ApiError::Question(e) => e,
        };

        match e {
            SubmitQuestionError::InvalidQuestion(_) => StatusCode::BAD_REQUEST,
            SubmitQuestionError::UpstreamQuestion {
                status: Some(status),
                ..
            } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            SubmitQuestionError::Configuration(_)
            | SubmitQuestionError::SessionCreation(_)
            | SubmitQuestionError::UpstreamQuestion { status: None, .. }
            | SubmitQuestionError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Question(SubmitQuestionError::UpstreamQuestion { body, .. }) => {
                format!("Humata AI error: {body}")
            }
            ApiError::Question(other) => other.to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Body(_) => "invalid_body",
            ApiError::Question(e) => e.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Chat request failed ({}): {}", self.kind(), self.detail());
        } else {
            warn!("Chat request rejected ({}): {}", self.kind(), self.detail());
        }

        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}
