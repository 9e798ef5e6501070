//! Server initialization and startup logic for Voxform.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use voxform_api::{AppState, InterfaceConfig, InterfaceServer, VoiceAgent};
use voxform_config::{Config, ConfigLoader, ConfigValidator, ProviderConfig};
use voxform_protocols::{ChatProvider, ProviderError};
use voxform_provider_openai::{DEFAULT_API_URL, OpenAIProvider};

/// `~/.voxform`, or `.voxform` when there is no home directory.
pub(crate) fn voxform_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".voxform"))
        .unwrap_or_else(|| PathBuf::from(".voxform"))
}

/// Configured log directory, or `~/.voxform/logs`.
pub(crate) fn log_dir(config: &Config) -> PathBuf {
    match &config.logging.dir {
        Some(dir) => PathBuf::from(ConfigLoader::expand_path(&dir.to_string_lossy())),
        None => voxform_dir().join("logs"),
    }
}

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so command output on stdout stays clean.
pub(crate) fn init_tracing(log_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("voxform")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Build the chat provider when an API key is available.
pub(crate) fn build_provider(
    config: &ProviderConfig,
) -> Result<Option<Arc<dyn ChatProvider>>, ProviderError> {
    let Some(api_key) = config.api_key.clone().filter(|key| !key.trim().is_empty()) else {
        return Ok(None);
    };
    let api_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let mut provider = OpenAIProvider::with_url(api_key, api_url);
    if let Some(seconds) = config.timeout_seconds {
        provider = provider.with_timeout(Duration::from_secs(seconds))?;
    }
    info!(url = provider.api_url(), model = %config.model, "Chat provider configured");
    Ok(Some(Arc::new(provider)))
}

/// Run the server in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Voxform v{}", env!("CARGO_PKG_VERSION"));

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(format!("invalid configuration ({} errors)", validation.errors.len()).into());
    }

    let provider = build_provider(&config.provider)?;
    let agent = VoiceAgent::from_config(&config.provider, provider);

    let interface_config = InterfaceConfig::from(config.server.clone());
    let state = Arc::new(AppState::new(config, agent));
    let server = InterfaceServer::new(interface_config, state);

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return Err(e);
    }
    Ok(())
}
