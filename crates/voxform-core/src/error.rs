//! Form engine errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Duplicate region id: {0}")]
    DuplicateRegion(String),

    #[error("Region is frozen: {0}")]
    RegionFrozen(String),

    #[error("Region does not hold text: {0}")]
    NotATextRegion(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] std::io::Error),
}
