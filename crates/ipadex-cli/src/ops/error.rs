//! Errors raised by pipeline operations

use thiserror::Error;

use crate::store::DbError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Record store error: {0}")]
    Store(#[from] DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: {message}")]
    Context {
        context: &'static str,
        message: String,
    },
}

impl PipelineError {
    /// Create an error with context for better debugging.
    pub fn context(ctx: &'static str, msg: impl std::fmt::Display) -> Self {
        Self::Context {
            context: ctx,
            message: msg.to_string(),
        }
    }

    /// Whether the run must stop rather than skip the current file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
