//! Error taxonomy for core operations.

use ctmux_tmux::TmuxError;
use thiserror::Error;

/// Every variant is terminal for the operation that raised it; nothing is retried.
#[derive(Debug, Error)]
pub enum CtlError {
    #[error("error connecting to tmux server: {0}")]
    ConnectionFailure(String),

    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Pane '{0}' not found")]
    PaneNotFound(String),

    #[error("Session name '{name}' matches {count} sessions")]
    AmbiguousSession { name: String, count: usize },

    #[error("No active pane found")]
    NoActivePane,

    #[error("pane no longer exists ({0})")]
    PaneGone(String),

    #[error("Session '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Tmux(TmuxError),
}

impl From<TmuxError> for CtlError {
    fn from(err: TmuxError) -> Self {
        match err {
            // The binary could not be spawned at all.
            TmuxError::Io(e) => CtlError::ConnectionFailure(e.to_string()),
            TmuxError::NoServer(msg) => CtlError::ConnectionFailure(msg),
            TmuxError::PaneGone(msg) => CtlError::PaneGone(msg),
            other => CtlError::Tmux(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CtlError>;
