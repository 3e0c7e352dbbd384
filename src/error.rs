//! Error types.

use thiserror::Error;

/// Errors raised by the toolkit.
///
/// `InvalidArgument` is the programmer-error class: it surfaces synchronously
/// at the call that was given bad values and is never recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    /// A constructor, layout constraint, drawing rectangle or tree edit was invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A second window was opened in the same process.
    #[error("Window already initialized")]
    AlreadyInitialized,

    /// Terminal I/O failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
