//! Voice agent endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::debug;
use voxform_protocols::{InterpretError, InterpretRequest};

use crate::agent::AgentReply;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct VoiceAgentBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
}

/// `POST /api/voice-agent`
///
/// A body that is absent or not JSON reads as empty and is answered as a
/// missing transcript.
pub async fn voice_agent(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VoiceAgentBody>, JsonRejection>,
) -> Result<Json<AgentReply>, ApiError> {
    state.increment_requests();
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable voice agent body");
            VoiceAgentBody::default()
        }
    };
    let transcript = body.transcript.unwrap_or_default();
    let mut request = InterpretRequest::new(transcript);
    request.prompt = body.prompt;

    match state.agent.respond(&request).await {
        Ok(reply) => Ok(Json(reply)),
        Err(InterpretError::MissingTranscript) => Err(ApiError::MissingTranscript),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}
