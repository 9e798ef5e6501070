//! # Voxform API
//!
//! HTTP interface for Voxform.
//!
//! - **Voice agent**: `POST /api/voice-agent` turns a transcript into a
//!   fill instruction through a chat completion provider
//! - **Form session**: upload a form, drive its regions (focus, typing,
//!   voice, images) and download exports
//! - **Monitoring**: `GET /api/health`
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     voxform-api                          │
//! │  ┌──────────────┐   ┌───────────────┐   ┌─────────────┐  │
//! │  │ /api/voice-  │   │    /form      │   │ /api/health │  │
//! │  │    agent     │   │  (session)    │   │             │  │
//! │  └──────┬───────┘   └───────┬───────┘   └─────────────┘  │
//! │         │                   │                            │
//! │         ▼                   ▼                            │
//! │    VoiceAgent ◄──────  FormSession (Mutex, one active)   │
//! └─────────┼────────────────────────────────────────────────┘
//!           ▼
//!     ChatProvider (OpenAI-compatible)
//! ```
//!
//! The session lock is never held while the voice agent talks to the
//! provider: the transcript is finalized under the lock, interpreted
//! without it, then applied under the lock again.

pub mod agent;
pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use agent::{AgentReply, DEFAULT_SYSTEM_PROMPT, VoiceAgent};
pub use error::ApiError;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::AppState;
