//! Capture engine: pane text plus cursor, with optional change detection.

use ctmux_tmux::{TmuxCommandRunner, capture_pane, cursor_position};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::fingerprint::{ChangeStatus, FingerprintStore, detect_change};
use crate::server::Server;

/// Which rows of a pane to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureRange {
    /// Visible rows only, no scrollback.
    #[default]
    Viewport,
    /// `lines` rows of scrollback followed by the visible rows.
    History { lines: u32 },
}

impl CaptureRange {
    /// `-S` / `-E` markers for `capture-pane`.
    fn markers(self) -> (String, &'static str) {
        match self {
            CaptureRange::Viewport => ("0".to_string(), "-"),
            CaptureRange::History { lines } => (format!("-{lines}"), "-"),
        }
    }
}

/// Text of a pane at one instant, with the cursor position at that instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub content: String,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl Capture {
    pub fn cursor_line(&self) -> String {
        format!("[cursor: {},{}]", self.cursor_x, self.cursor_y)
    }

    /// Content, followed by the cursor metadata line unless `raw`.
    pub fn render(&self, raw: bool) -> String {
        if raw {
            self.content.clone()
        } else {
            format!("{}\n{}", self.content, self.cursor_line())
        }
    }
}

/// Read a pane's rows and join them into one newline-separated string.
///
/// Escape sequences are passed through untouched.
pub fn capture(
    runner: &impl TmuxCommandRunner,
    pane_id: &str,
    range: CaptureRange,
) -> Result<Capture> {
    let (start, end) = range.markers();
    let lines = capture_pane(runner, pane_id, &start, end)?;
    let (cursor_x, cursor_y) = cursor_position(runner, pane_id)?;
    Ok(Capture {
        content: lines.join("\n"),
        cursor_x,
        cursor_y,
    })
}

/// Arguments of a single-shot capture.
#[derive(Debug, Clone, Default)]
pub struct CaptureRequest<'a> {
    pub session: &'a str,
    pub pane: Option<&'a str>,
    pub range: CaptureRange,
    /// Report [`CaptureOutcome::Unchanged`] when the stored fingerprint matches.
    pub if_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Unchanged,
    Captured(Capture),
}

impl CaptureOutcome {
    pub fn render(&self, raw: bool) -> String {
        match self {
            CaptureOutcome::Unchanged => "[no change]".to_string(),
            CaptureOutcome::Captured(c) => c.render(raw),
        }
    }
}

/// Resolve, capture and optionally compare against the fingerprint store.
pub fn capture_target<R, S>(
    server: &Server<R>,
    store: &S,
    req: &CaptureRequest<'_>,
) -> Result<CaptureOutcome>
where
    R: TmuxCommandRunner,
    S: FingerprintStore + ?Sized,
{
    let target = server.target(req.session, req.pane)?;
    let captured = capture(server.runner(), &target.pane.id, req.range)?;
    if req.if_changed {
        let key = target.fingerprint_key();
        if detect_change(store, &key, &captured.content) == ChangeStatus::Unchanged {
            return Ok(CaptureOutcome::Unchanged);
        }
    }
    debug!(pane = %target.pane.id, bytes = captured.content.len(), "captured pane");
    Ok(CaptureOutcome::Captured(captured))
}
