//! Error types for registry loading.
//!
//! Directive extraction and completion never fail; the only fallible
//! surface is building an [`OptionRegistry`](crate::registry::OptionRegistry)
//! from external metadata.

use thiserror::Error;

/// Errors produced while loading option metadata.
#[derive(Error, Debug)]
pub enum DirectiveError {
    #[error("failed to read option metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid option metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, DirectiveError>;
