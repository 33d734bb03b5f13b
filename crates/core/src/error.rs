//! Persistence boundary error model.

use thiserror::Error;

/// Result type returned by keyed stores.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a store adapter.
///
/// Domain outcomes (missing records, duplicates) are never reported through
/// this type; a lookup miss is `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or its state is unusable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record could not be encoded or decoded by the adapter.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}
