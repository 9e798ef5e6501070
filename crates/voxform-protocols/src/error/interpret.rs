//! Transcript interpretation errors.

use thiserror::Error;

use super::ProviderError;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("Missing transcript")]
    MissingTranscript,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed instruction: {0}")]
    Malformed(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}
