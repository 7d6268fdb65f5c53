//! Error types for thread construction and project analysis
//!
//! Only caller-contract violations are errors. A mention that resolves to
//! nobody or a quote without a source is an ordinary non-match and is
//! reported through [`crate::Report`] and [`crate::Diagnostics`] instead.

use thiserror::Error;

/// A segmented group could not form a single thread.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedThreadError {
    #[error("thread has no comments")]
    Empty,

    #[error("thread mixes thread ids: expected {expected}, found {found} (comment {comment_id})")]
    MixedThreadIds {
        expected: String,
        found: String,
        comment_id: u64,
    },

    #[error("thread {thread_id} mixes diff positions: expected {expected:?}, found {found:?} (comment {comment_id})")]
    MixedPositions {
        thread_id: String,
        expected: Option<i64>,
        found: Option<i64>,
        comment_id: u64,
    },
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("malformed thread: {0}")]
    MalformedThread(#[from] MalformedThreadError),

    #[error("malformed comment {comment_id} in thread {thread_id}: {reason}")]
    MalformedComment {
        thread_id: String,
        comment_id: u64,
        reason: String,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
