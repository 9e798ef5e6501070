//! # Voxform Protocols
//!
//! Types and traits shared between the form engine, the voice agent server
//! and the command line client. Contains no transport or DOM code.
//!
//! - [`FillInstruction`] - structured result of interpreting a transcript
//! - [`TranscriptInterpreter`] - anything that can turn a transcript into a
//!   [`FillInstruction`] (in-process voice agent or remote HTTP client)
//! - [`ChatProvider`] - chat completion backend used by the voice agent

pub mod error;
pub mod fill;
pub mod interpreter;
pub mod provider;

pub use error::{InterpretError, ProviderError};
pub use fill::{FillAction, FillInstruction, InterpretRequest, ValueType};
pub use interpreter::TranscriptInterpreter;
pub use provider::{ChatProvider, ChatRequest};
