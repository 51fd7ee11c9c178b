//! Key submission via `send-keys`.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Send `text` to a pane byte-for-byte (`send-keys -l`); key names are not parsed.
pub fn send_literal(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
    text: &str,
) -> Result<(), TmuxError> {
    // `--` keeps text starting with '-' from being read as flags
    runner.run(&["send-keys", "-t", pane_id, "-l", "--", text])?;
    Ok(())
}

/// Send key arguments to a pane with tmux key-name parsing (`Enter`, `C-c`, ...).
///
/// Each argument that names a key is translated; anything else is sent as text.
pub fn send_keys(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
    keys: &[&str],
) -> Result<(), TmuxError> {
    let mut args = vec!["send-keys", "-t", pane_id, "--"];
    args.extend_from_slice(keys);
    runner.run(&args)?;
    Ok(())
}
