//! Form session handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voxform_core::{
    AttachOutcome, EventOutcome, FormSession, FormSummary, ImageFile, RegionEvent, RegionId,
    VoiceOutcome, interpret_with_fallback,
};
use voxform_export::ExportFormat;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_FORM_NAME: &str = "form.html";

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptBody {
    pub transcript: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventReply {
    pub region: RegionId,
    pub outcome: EventOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextReply {
    pub region: RegionId,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachReply {
    /// `replaced`, `inserted` or `ignored`.
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionId>,
}

impl From<AttachOutcome> for AttachReply {
    fn from(outcome: AttachOutcome) -> Self {
        match outcome {
            AttachOutcome::Replaced(id) => Self {
                outcome: "replaced",
                region: Some(id),
            },
            AttachOutcome::Inserted(id) => Self {
                outcome: "inserted",
                region: Some(id),
            },
            AttachOutcome::Ignored => Self {
                outcome: "ignored",
                region: None,
            },
        }
    }
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// `POST /form?name=<file>` with the markup as body. Replaces any loaded form.
pub async fn upload_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    body: String,
) -> Result<Json<FormSummary>, ApiError> {
    state.increment_requests();
    let name = query
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FORM_NAME.to_string());

    let session = FormSession::load(name, &body, state.session_options())?;
    let summary = session.summary();
    let mut slot = state.slot().await;
    if let Some(previous) = slot.replace(session) {
        info!(file = %previous.file_name(), "Replacing loaded form");
    }
    Ok(Json(summary))
}

/// `GET /form`: the form as currently displayed.
pub async fn live_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    state
        .with_session(|session| Ok(Html(session.live_view()?)))
        .await
}

/// `GET /form/regions`
pub async fn regions(State(state): State<Arc<AppState>>) -> Result<Json<FormSummary>, ApiError> {
    state.with_session(|session| Ok(Json(session.summary()))).await
}

// ============================================================================
// Region interaction
// ============================================================================

async fn dispatch(state: &AppState, id: String, event: RegionEvent) -> Result<Json<EventReply>, ApiError> {
    let region = RegionId::from(id);
    let outcome = state
        .with_session(|session| Ok(session.dispatch(&region, event)?))
        .await?;
    debug!(region = %region, ?event, ?outcome, "Region event");
    Ok(Json(EventReply { region, outcome }))
}

/// `POST /form/regions/{id}/focus`
pub async fn focus(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<EventReply>, ApiError> {
    dispatch(&state, id, RegionEvent::Focus).await
}

/// `POST /form/regions/{id}/blur`
pub async fn blur(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<EventReply>, ApiError> {
    dispatch(&state, id, RegionEvent::Blur).await
}

/// `POST /form/regions/{id}/click`
pub async fn click(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<EventReply>, ApiError> {
    dispatch(&state, id, RegionEvent::Click).await
}

/// `POST /form/regions/{id}/voice`: start listening for that region.
pub async fn activate_voice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EventReply>, ApiError> {
    dispatch(&state, id, RegionEvent::ActivateVoice).await
}

/// `PUT /form/regions/{id}/text`
pub async fn set_text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<TextBody>,
) -> Result<Json<TextReply>, ApiError> {
    let region = RegionId::from(id);
    let text = state
        .with_session(|session| {
            session.set_text(&region, &body.text)?;
            Ok(session.text(&region).unwrap_or_default())
        })
        .await?;
    Ok(Json(TextReply { region, text }))
}

// ============================================================================
// Voice
// ============================================================================

/// `POST /form/voice/transcript`
///
/// The session lock is released while the agent interprets the transcript.
pub async fn voice_transcript(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranscriptBody>,
) -> Result<Json<VoiceOutcome>, ApiError> {
    state.increment_requests();
    let (pending, mut request) = state
        .with_session(|session| {
            let pending = session
                .finalize_transcript(&body.transcript)
                .ok_or(ApiError::NotListening)?;
            let request = session.voice_request(&pending);
            Ok((pending, request))
        })
        .await?;
    if let Some(prompt) = body.prompt.filter(|prompt| !prompt.is_empty()) {
        request.prompt = Some(prompt);
    }

    // Interpret and apply always run to completion, even when the caller
    // goes away, so the interpreter never stays busy.
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let instruction = interpret_with_fallback(task_state.agent.as_ref(), request).await;
        task_state
            .with_session(|session| Ok(session.apply_instruction(pending, instruction)))
            .await
    });
    let outcome = task
        .await
        .map_err(|e| ApiError::Internal(format!("Voice task failed: {}", e)))??;
    Ok(Json(outcome))
}

/// `POST /form/voice/error`: the recognizer gave up.
pub async fn voice_error(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecognitionErrorBody>,
) -> Result<StatusCode, ApiError> {
    state
        .with_session(|session| {
            session.recognition_failed(&body.error);
            Ok(StatusCode::NO_CONTENT)
        })
        .await
}

// ============================================================================
// Images
// ============================================================================

/// `POST /form/regions/{id}/image?name=<file>` with the image bytes as body.
pub async fn attach_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<NameQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AttachReply>, ApiError> {
    let region = RegionId::from(id);
    let mut file = ImageFile::new(query.name.unwrap_or_default(), body.to_vec());
    if let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.starts_with("image/"))
    {
        file = file.with_content_type(content_type);
    }

    let outcome = state
        .with_session(|session| Ok(session.attach_image(&region, &file)?))
        .await?;
    Ok(Json(outcome.into()))
}

// ============================================================================
// Export
// ============================================================================

/// `GET /form/export/{format}`
pub async fn export(State(state): State<Arc<AppState>>, Path(format): Path<String>) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse()?;
    let artifact = state
        .with_session(|session| Ok(voxform_export::export(session, format)?))
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (header::CONTENT_DISPOSITION, artifact.content_disposition()),
        ],
        artifact.bytes,
    )
        .into_response())
}
