//! Error taxonomy for the build orchestration engine.
//!
//! Two failure domains exist: the core (non-streaming) generation call and
//! the per-task fragment streams. A `GenerationError` is fatal to the whole
//! build cycle before any streaming starts; a `StreamError` fails the cycle's
//! join without rolling back sibling tasks' partial accumulation. No failure
//! is retried; each is terminal for its enclosing operation and reported once.

use crate::types::TaskKind;
use thiserror::Error;

/// Failure of the core project-file generation call.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Failure of one supplementary task's fragment stream.
///
/// Cloneable so the first failure can be both recorded in the fan-out
/// outcome and propagated to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("Stream for {task} could not be opened: {message}")]
    OpenFailed { task: TaskKind, message: String },

    #[error("Stream for {task} failed mid-sequence: {message}")]
    Interrupted { task: TaskKind, message: String },
}

impl StreamError {
    pub fn task(&self) -> TaskKind {
        match self {
            StreamError::OpenFailed { task, .. } => *task,
            StreamError::Interrupted { task, .. } => *task,
        }
    }
}

/// Top-level API error
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
