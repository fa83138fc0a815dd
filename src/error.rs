//! Error type shared by every stage of the crate.

use thiserror::Error;

/// Errors raised on precondition violations.
///
/// Every failure in this crate is a contract violation by the caller (wrong
/// rank, wrong channel count, mismatched lengths, empty input). Nothing here
/// is transient or worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Array shape, channel count or vector length does not match what the
    /// operation requires.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
