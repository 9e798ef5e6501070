//! Health check.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    #[serde(rename = "openaiConfigured")]
    pub openai_configured: bool,
    pub version: String,
    pub uptime_seconds: u64,
}

/// `GET /api/health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Voice AI server is running".to_string(),
        openai_configured: state.agent.is_configured(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_field_names() {
        let response = HealthResponse {
            status: "ok".to_string(),
            message: "Voice AI server is running".to_string(),
            openai_configured: false,
            version: "0.1.0".to_string(),
            uptime_seconds: 3,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["openaiConfigured"], false);
        assert_eq!(json["uptime_seconds"], 3);
        assert!(json.get("openai_configured").is_none());
    }

    #[tokio::test]
    async fn test_health_check_reports_provider() {
        let state = Arc::new(AppState::default());
        let Json(response) = health_check(State(state)).await;
        assert_eq!(response.status, "ok");
        assert!(!response.openai_configured);
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
