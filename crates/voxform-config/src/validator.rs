//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_provider(config, &mut result);
        Self::validate_voice(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }

        for origin in &config.server.cors_origins {
            if !is_http_url(origin) {
                result.add_error(ValidationError::new(
                    "server.cors_origins",
                    format!("Origin '{}' must start with http:// or https://", origin),
                ));
            }
        }
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let provider = &config.provider;

        if provider.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "provider.api_key",
                "API key is not set; transcripts will be answered with fallback instructions",
            ));
        }

        if let Some(ref url) = provider.base_url {
            if !is_http_url(url) {
                result.add_error(ValidationError::new(
                    "provider.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        if provider.model.is_empty() {
            result.add_error(ValidationError::new("provider.model", "Model cannot be empty"));
        }

        if !(0.0..=2.0).contains(&provider.temperature) {
            result.add_error(ValidationError::new(
                "provider.temperature",
                "temperature must be between 0 and 2",
            ));
        }

        if provider.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "provider.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if provider.timeout_seconds == Some(0) {
            result.add_error(ValidationError::new(
                "provider.timeout_seconds",
                "timeout_seconds must be greater than 0 when set",
            ));
        }
    }

    fn validate_voice(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.voice.endpoint) {
            result.add_error(ValidationError::new(
                "voice.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        let threshold = config.voice.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            result.add_error(ValidationError::new(
                "voice.confidence_threshold",
                "confidence_threshold must be within [0, 1]",
            ));
        } else if threshold >= 1.0 {
            result.add_warning(ValidationWarning::new(
                "voice.confidence_threshold",
                "a threshold of 1.0 rejects every instruction",
            ));
        }
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
