//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::http::{form, monitoring, voice};
use crate::state::AppState;

/// Create the main router.
///
/// ## Route Structure
///
/// ```text
/// /api
///   POST   /api/voice-agent                - Transcript to fill instruction
///   GET    /api/health                     - Health check
///
/// /form
///   POST   /form?name=<file>               - Upload markup, start a session
///   GET    /form                           - Live view
///   GET    /form/regions                   - Region summary
///   POST   /form/regions/{id}/focus        - Focus a region
///   POST   /form/regions/{id}/blur         - Blur a region
///   POST   /form/regions/{id}/click        - Click a region
///   PUT    /form/regions/{id}/text         - Type into a field
///   POST   /form/regions/{id}/voice        - Start listening for a field
///   POST   /form/regions/{id}/image        - Attach an image
///   POST   /form/voice/transcript          - Deliver a recognized transcript
///   POST   /form/voice/error               - Report a recognition failure
///   GET    /form/export/{format}           - Download html, xlsx or print
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/voice-agent", post(voice::voice_agent))
        .route("/health", get(monitoring::health_check))
        .with_state(state.clone());

    let form_routes = Router::new()
        .route("/", post(form::upload_form).get(form::live_view))
        .route("/regions", get(form::regions))
        .route("/regions/{id}/focus", post(form::focus))
        .route("/regions/{id}/blur", post(form::blur))
        .route("/regions/{id}/click", post(form::click))
        .route("/regions/{id}/text", put(form::set_text))
        .route("/regions/{id}/voice", post(form::activate_voice))
        .route("/regions/{id}/image", post(form::attach_image))
        .route("/voice/transcript", post(form::voice_transcript))
        .route("/voice/error", post(form::voice_error))
        .route("/export/{format}", get(form::export))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/form", form_routes)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
