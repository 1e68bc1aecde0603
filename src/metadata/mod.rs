//! Cube metadata: the identifier index consumed by the compiler.
//!
//! The index is produced outside the compiler (from the BI service's field
//! listing) and is only ever read during compilation.

mod index;
mod outline;

use std::path::PathBuf;

pub use index::{DimensionMeta, FieldDocument, FieldKind, MetadataIndex, RawField};

/// Result type for metadata loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors loading a metadata document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Metadata file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read metadata file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse metadata document: {0}")]
    ParseError(#[from] serde_json::Error),
}
