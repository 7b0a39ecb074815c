//! Error types for the typing session engine

use std::path::PathBuf;

use thiserror::Error;

use crate::session::Phase;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while building or driving a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The reference text tokenized to zero words
    #[error("reference text contains no words")]
    EmptyReferenceText,

    /// A command was issued in a phase that does not allow it.
    /// The session is left untouched.
    #[error("cannot {command} while {phase}")]
    InvalidPhaseTransition { command: &'static str, phase: Phase },

    /// A reference text file could not be read
    #[error("cannot read reference text from {}: {source}", path.display())]
    TextSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
