//! Query IR: the structured query produced by the extraction step.

mod condition;
mod query;

use std::path::PathBuf;

pub use condition::{CondValue, Condition, Operator, Scalar};
pub use query::{OrderBy, QueryIr};

/// Result type for IR loading.
pub type IrResult<T> = Result<T, IrError>;

/// Errors loading a query IR document.
#[derive(Debug, thiserror::Error)]
pub enum IrError {
    #[error("Query file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read query file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse query document: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown condition operator: '{0}'")]
    UnknownOperator(String),
}
