//! PaneRow, list-panes format string, and parser.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Tab-delimited format string for `tmux list-panes -a -F`.
///
/// One row per pane carries everything needed to rebuild the
/// session → window → pane tree in a single invocation.
pub const LIST_PANES_FORMAT: &str = "#{session_id}\t#{session_name}\t#{session_attached}\t#{session_created}\t#{window_id}\t#{window_index}\t#{window_name}\t#{window_active}\t#{pane_id}\t#{pane_index}\t#{pane_active}\t#{pane_width}\t#{pane_height}\t#{cursor_x}\t#{cursor_y}";

const FIELD_COUNT: usize = 15;

/// One pane as reported by `list-panes -a`, with its owning window and session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaneRow {
    pub session_id: String,
    pub session_name: String,
    pub session_attached: bool,
    pub session_created: Option<DateTime<Utc>>,
    pub window_id: String,
    pub window_index: u32,
    pub window_name: String,
    pub window_active: bool,
    pub pane_id: String,
    pub pane_index: u32,
    pub pane_active: bool,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

/// Execute `tmux list-panes -a` and parse the output.
///
/// A missing server is reported as an empty listing: there is simply
/// nothing to enumerate.
pub fn list_pane_rows(runner: &impl TmuxCommandRunner) -> Result<Vec<PaneRow>, TmuxError> {
    match runner.run(&["list-panes", "-a", "-F", LIST_PANES_FORMAT]) {
        Ok(output) => parse_list_panes_output(&output),
        Err(TmuxError::NoServer(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Parse the raw output of `tmux list-panes -a -F <FORMAT>`.
pub fn parse_list_panes_output(output: &str) -> Result<Vec<PaneRow>, TmuxError> {
    let mut rows = Vec::new();
    for (idx, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_line(line, idx + 1)?);
    }
    Ok(rows)
}

fn parse_line(line: &str, line_num: usize) -> Result<PaneRow, TmuxError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() != FIELD_COUNT {
        return Err(TmuxError::ParseError {
            line_num,
            detail: format!(
                "expected {FIELD_COUNT} tab-separated fields, got {}",
                parts.len()
            ),
        });
    }

    let number = |i: usize, what: &str| -> Result<u32, TmuxError> {
        parts[i].trim().parse::<u32>().map_err(|_| TmuxError::ParseError {
            line_num,
            detail: format!("invalid {what}: {:?}", parts[i]),
        })
    };

    Ok(PaneRow {
        session_id: parts[0].to_string(),
        session_name: parts[1].to_string(),
        // session_attached is a client count, not a flag
        session_attached: number(2, "session_attached").unwrap_or(0) > 0,
        session_created: parse_timestamp(parts[3]),
        window_id: parts[4].to_string(),
        window_index: number(5, "window_index")?,
        window_name: parts[6].to_string(),
        window_active: parse_bool(parts[7]),
        pane_id: parts[8].to_string(),
        pane_index: number(9, "pane_index")?,
        pane_active: parse_bool(parts[10]),
        width: parts[11].trim().parse::<u16>().unwrap_or(80),
        height: parts[12].trim().parse::<u16>().unwrap_or(24),
        cursor_x: parts[13].trim().parse::<u16>().unwrap_or(0),
        cursor_y: parts[14].trim().parse::<u16>().unwrap_or(0),
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = s.trim().parse().ok()?;
    Utc.timestamp_opt(secs, 0).single()
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim(), "1" | "true")
}
