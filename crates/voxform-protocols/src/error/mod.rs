//! Error types for the Voxform protocol layer.

mod interpret;
mod provider;

pub use interpret::*;
pub use provider::*;
