use super::*;

fn configured() -> Config {
    let mut config = Config::default();
    config.provider.api_key = Some("sk-test".to_string());
    config
}

#[test]
fn test_validate_default_config() {
    let result = ConfigValidator::validate(&configured());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_missing_api_key_is_a_warning() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "provider.api_key"));
}

#[test]
fn test_validate_invalid_port() {
    let mut config = configured();
    config.server.port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "server.port"));
}

#[test]
fn test_validate_invalid_origin() {
    let mut config = configured();
    config.server.cors_origins.push("localhost:8080".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "server.cors_origins"));
}

#[test]
fn test_validate_invalid_base_url() {
    let mut config = configured();
    config.provider.base_url = Some("invalid-url".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "provider.base_url"));
}

#[test]
fn test_validate_temperature_range() {
    let mut config = configured();
    config.provider.temperature = 3.5;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "provider.temperature"));
}

#[test]
fn test_validate_zero_max_tokens() {
    let mut config = configured();
    config.provider.max_tokens = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "provider.max_tokens"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = configured();
    config.provider.timeout_seconds = Some(0);

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "provider.timeout_seconds"));
}

#[test]
fn test_validate_threshold_out_of_range() {
    let mut config = configured();
    config.voice.confidence_threshold = 1.5;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "voice.confidence_threshold"));
}

#[test]
fn test_validate_threshold_of_one_warns() {
    let mut config = configured();
    config.voice.confidence_threshold = 1.0;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "voice.confidence_threshold"));
}

#[test]
fn test_validate_bad_endpoint() {
    let mut config = configured();
    config.voice.endpoint = "ftp://example.test".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "voice.endpoint"));
}
