//! Error types for the narrative engine.
//!
//! This module defines the centralized error type [`NarrativeError`] and a type alias
//! [`Result`] used throughout the crate. Errors fall into three families:
//!
//! - **Programming errors** (`UnknownView`, `DuplicateView`): a handler or the
//!   catalog referenced a view that does not exist, or registered one twice.
//!   The operation aborts before any state is touched.
//! - **Expected, user-correctable rejections** (`ValidationRejected`): handled
//!   inline with a transient visual cue, never with a conventional error message.
//! - **Transport failures** (`TransportFailure`): masked from the visitor by the
//!   submission flow, but reported on the operator log channel.

use thiserror::Error;

/// The main error type for engine operations.
///
/// # Examples
///
/// ```
/// use voidgate::domain::NarrativeError;
///
/// fn resolve() -> Result<(), NarrativeError> {
///     Err(NarrativeError::UnknownView("secret-9".to_string()))
/// }
///
/// assert!(resolve().unwrap_err().is_programming_error());
/// ```
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// A transition or lookup referenced a view id that was never registered.
    #[error("unknown view: {0}")]
    UnknownView(String),

    /// A view id was registered twice.
    #[error("duplicate view: {0}")]
    DuplicateView(String),

    /// An email address failed the local pre-check or was rejected by the server.
    #[error("validation rejected: {0}")]
    ValidationRejected(String),

    /// The submission endpoint was unreachable or answered with something unparsable.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NarrativeError {
    /// Returns `true` for errors that indicate a wiring mistake rather than a
    /// runtime condition.
    #[must_use]
    pub const fn is_programming_error(&self) -> bool {
        matches!(self, Self::UnknownView(_) | Self::DuplicateView(_))
    }
}

/// A specialized `Result` type for engine operations.
pub type Result<T> = std::result::Result<T, NarrativeError>;
