//! Pane capture and cursor inspection.

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Capture the rows between `start` and `end` of a pane.
///
/// Markers use tmux's `-S`/`-E` convention: `0` is the first visible row,
/// negative numbers reach into scrollback and `-` means the last visible row.
/// tmux prints every row of the range, so the blank rows below the last
/// written one are dropped.
pub fn capture_pane(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
    start: &str,
    end: &str,
) -> Result<Vec<String>, TmuxError> {
    let output = runner.run(&["capture-pane", "-p", "-t", pane_id, "-S", start, "-E", end])?;
    let mut lines: Vec<String> = output.lines().map(String::from).collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    Ok(lines)
}

/// Current cursor position `(x, y)` of a pane, in character cells.
pub fn cursor_position(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
) -> Result<(u16, u16), TmuxError> {
    let output = runner.run(&["display-message", "-p", "-t", pane_id, "#{cursor_x}\t#{cursor_y}"])?;
    let line = output.trim_end_matches('\n');
    let parsed = line
        .split_once('\t')
        .and_then(|(x, y)| Some((x.trim().parse().ok()?, y.trim().parse().ok()?)));
    parsed.ok_or_else(|| TmuxError::ParseError {
        line_num: 1,
        detail: format!("invalid cursor position: {line:?}"),
    })
}
