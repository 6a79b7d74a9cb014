//! Error types for restoring and exchanging session records.

use thiserror::Error;

use crate::model::LabelId;

/// Errors that can occur when loading records into a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O error while reading or writing record files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record references a label that does not exist
    #[error("Label not found: {id}")]
    UnknownLabel {
        /// The missing label id
        id: LabelId,
    },

    /// Two records claim the same label id
    #[error("Duplicate label id: {id}")]
    DuplicateLabel {
        /// The repeated id
        id: LabelId,
    },

    /// A parent/child link would make a label its own ancestor
    #[error("Linking label {child} under {parent} would create a cycle")]
    CyclicLink {
        /// Requested parent
        parent: LabelId,
        /// Requested child
        child: LabelId,
    },

    /// An item record points past the session's item list
    #[error("Item index {index} out of range (session has {len} items)")]
    ItemOutOfRange {
        /// The requested index
        index: usize,
        /// Number of items in the session
        len: usize,
    },
}
