//! OpenAI chat completion provider for Voxform.

mod api;
mod provider;

pub use provider::{DEFAULT_API_URL, OpenAIProvider};
