//! API error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use voxform_core::FormError;
use voxform_export::ExportError;
use voxform_protocols::FillInstruction;

use crate::agent::AgentReply;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No form loaded")]
    NoSession,

    #[error("Missing transcript")]
    MissingTranscript,

    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Region is frozen: {0}")]
    RegionFrozen(String),

    #[error("No region is listening for a transcript")]
    NotListening,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoSession | Self::RegionNotFound(_) => StatusCode::NOT_FOUND,
            Self::RegionFrozen(_) | Self::NotListening => StatusCode::CONFLICT,
            Self::MissingTranscript | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Export(ExportError::UnknownFormat(_)) => StatusCode::BAD_REQUEST,
            Self::Export(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::RegionNotFound(id) => Self::RegionNotFound(id),
            FormError::RegionFrozen(id) => Self::RegionFrozen(id),
            FormError::NotATextRegion(id) => Self::BadRequest(format!("Region does not hold text: {}", id)),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::MissingTranscript = self {
            // Callers parse this body as a (zero-confidence) fill instruction.
            let reply = AgentReply::rejected(FillInstruction::missing_transcript(), self.to_string());
            return (status, Json(reply)).into_response();
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
