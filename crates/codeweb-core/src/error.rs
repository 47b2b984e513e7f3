//! Store error types

use crate::model::NodeKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A write referenced a node that has not been created yet.
    #[error("no such node: {0}")]
    MissingNode(NodeKey),

    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    #[error("graph snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("graph snapshot is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
