//! Error types for the tmux backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    #[error("failed to parse list-panes line {line_num}: {detail}")]
    ParseError { line_num: usize, detail: String },

    #[error("tmux io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server socket is absent or refused the connection.
    #[error("no tmux server: {0}")]
    NoServer(String),

    /// The addressed pane no longer exists.
    #[error("pane gone: {0}")]
    PaneGone(String),
}
