//! # Voxform Core
//!
//! Form engine: parses uploaded markup into a [`Document`], detects blanks
//! with the [`FieldClassifier`], turns them into editable regions with the
//! [`EditableTransformer`], and fills them by voice or image through a
//! [`FormSession`].

pub mod classifier;
pub mod context;
pub mod dom;
pub mod error;
pub mod image;
pub mod region;
pub mod session;
pub mod transform;
pub mod voice;

pub use classifier::FieldClassifier;
pub use context::InteractionContext;
pub use dom::{Document, NodeId};
pub use error::FormError;
pub use image::{AttachOutcome, ImageAttachmentHandler, ImageFile, UploadedImages};
pub use region::{
    EventOutcome, FieldRegion, ImageSlot, Region, RegionEvent, RegionId, RegionKind,
    RegionRouter, RegionState,
};
pub use session::{FormSession, FormSummary, RegionSummary, SessionOptions, VoiceOutcome};
pub use transform::{EditableTransformer, TransformReport};
pub use voice::{
    PendingCommand, RemoteInterpreter, VoiceCommandInterpreter, VoiceState,
    interpret_with_fallback,
};
