//! Error types for the serving pipeline
//!
//! The pipeline does no I/O of its own, so the taxonomy is deliberately
//! small: configuration problems caught up front, and faults surfaced by
//! the background retrieval task at the join point.

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum RagError {
    /// Configuration error - rejected before any request is served
    #[error("Configuration error: {0}")]
    Config(String),

    /// The background retrieval task failed before producing a result
    #[error("Retrieval task failed: {0}")]
    RetrievalTask(#[from] tokio::task::JoinError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, RagError>;
