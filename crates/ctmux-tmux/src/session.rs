//! Session creation and teardown.

use tracing::debug;

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Parameters for `tmux new-session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub name: String,
    pub window_name: String,
    pub start_dir: String,
    pub width: u16,
    pub height: u16,
}

/// Create a detached session and return the ID of its first pane.
pub fn new_session(
    runner: &impl TmuxCommandRunner,
    params: &NewSession,
) -> Result<String, TmuxError> {
    debug!(name = %params.name, window = %params.window_name, "creating tmux session");
    let width = params.width.to_string();
    let height = params.height.to_string();
    let output = runner.run(&[
        "new-session",
        "-d",
        "-P",
        "-F",
        "#{pane_id}",
        "-s",
        &params.name,
        "-n",
        &params.window_name,
        "-c",
        &params.start_dir,
        "-x",
        &width,
        "-y",
        &height,
    ])?;
    let pane_id = output.trim();
    if pane_id.is_empty() {
        return Err(TmuxError::CommandFailed(format!(
            "new-session '{}' reported no pane",
            params.name
        )));
    }
    Ok(pane_id.to_string())
}

/// Kill a session by ID (`$N`) or exact-match target (`=name`).
pub fn kill_session(runner: &impl TmuxCommandRunner, target: &str) -> Result<(), TmuxError> {
    debug!(session = %target, "killing tmux session");
    runner.run(&["kill-session", "-t", target])?;
    Ok(())
}
