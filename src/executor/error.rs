//! Executor-specific error types.

use thiserror::Error;

use crate::compile::CompileError;

/// Result type for executor operations.
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Errors that can occur while running a statement against a BI service.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The statement could not be compiled.
    #[error("compilation failed: {0}")]
    Compile(#[from] CompileError),

    /// The service could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with an error.
    #[error("service error: {message} (status: {status})")]
    Remote {
        /// Status reported by the service.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// Failed to deserialize the cellset.
    #[error("failed to deserialize cellset: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// A data cell addresses a coordinate outside the result grid.
    #[error("cell ({row}, {column}) outside a {rows}x{columns} grid")]
    CellOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
}

impl ExecutorError {
    /// Create a remote error from a service response.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}
