//! Route handlers

use super::error::ApiError;
use super::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// `GET /` and `HEAD /`
pub async fn home(State(state): State<AppState>) -> Json<WelcomeBody> {
    Json(WelcomeBody {
        message: state.welcome_message.to_string(),
    })
}

/// `POST /chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload?;
    debug!("Chat request ({} chars)", request.message.chars().count());

    let answer = state.submitter.submit(&request.message).await?;
    info!("Answered chat request ({} answer)", answer.source);

    Ok(Json(ChatReply { reply: answer.text }))
}
