//! Interface server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use voxform_config::ServerConfig;

use crate::http::routes::create_router;
use crate::state::AppState;

/// Interface server configuration.
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API with credentials.
    pub cors_origins: Vec<String>,
}

impl InterfaceConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            cors_origins: Vec::new(),
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for InterfaceConfig {
    fn from(config: ServerConfig) -> Self {
        Self::new(config.host, config.port).with_cors_origins(config.cors_origins)
    }
}

/// The interface server.
pub struct InterfaceServer {
    config: InterfaceConfig,
    state: Arc<AppState>,
}

impl InterfaceServer {
    pub fn new(config: InterfaceConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Router with CORS and request tracing applied.
    pub fn app(&self) -> Router {
        create_router(self.state.clone())
            .layer(cors_layer(&self.config.cors_origins))
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.app();

        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Interface server listening on {}", addr);
        info!("Health check: http://{}/api/health", addr);
        info!("Voice endpoint: http://{}/api/voice-agent", addr);
        if self.state.agent.is_configured() {
            info!("Chat provider configured");
        } else {
            warn!("No chat provider API key; voice requests will fall back to raw transcripts");
        }
        axum::serve(listener, app).await?;

        Ok(())
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[test]
    fn test_interface_config_default() {
        let config = InterfaceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3001);
        assert!(config.cors_origins.contains(&"http://localhost:5173".to_string()));
    }

    #[test]
    fn test_interface_config_new() {
        let config = InterfaceConfig::new("0.0.0.0", 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_interface_server_addr_format() {
        let config = InterfaceConfig::new("192.168.1.1", 443);
        let server = InterfaceServer::new(config, Arc::new(AppState::default()));
        assert_eq!(server.addr(), "192.168.1.1:443");
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let server = InterfaceServer::new(InterfaceConfig::default(), Arc::new(AppState::default()));
        let response = server
            .app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers().get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let server = InterfaceServer::new(InterfaceConfig::default(), Arc::new(AppState::default()));
        let response = server
            .app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
