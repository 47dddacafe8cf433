//! Error types.

use thiserror::Error;

use crate::state::EventKind;

/// Boxed error returned by event handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by event handlers.
pub type HandlerResult = std::result::Result<(), HandlerError>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stylesheet parse error: {0}")]
    StylesheetParse(#[from] toml::de::Error),

    #[error("stylesheet rule `{selector}` must be a table of properties")]
    StylesheetShape { selector: String },

    #[error("{kind:?} handler failed: {source}")]
    Handler {
        kind: EventKind,
        #[source]
        source: HandlerError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
