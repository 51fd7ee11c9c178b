//! Target resolution: session name → session, optional pane reference → pane.
//!
//! Pure lookups over a snapshot; callers fetch the snapshot fresh per operation.

use tracing::debug;

use crate::error::{CtlError, Result};
use crate::model::{Pane, Session, Window};

/// Find the session with exactly this name.
///
/// Duplicate names are reported as [`CtlError::AmbiguousSession`] rather than
/// picking one of them.
pub fn resolve_session<'a>(sessions: &'a [Session], name: &str) -> Result<&'a Session> {
    let mut matches = sessions.iter().filter(|s| s.name == name);
    let first = matches
        .next()
        .ok_or_else(|| CtlError::SessionNotFound(name.to_string()))?;
    let extra = matches.count();
    if extra > 0 {
        return Err(CtlError::AmbiguousSession {
            name: name.to_string(),
            count: extra + 1,
        });
    }
    debug!(session = %name, id = %first.id, "resolved session");
    Ok(first)
}

/// Find a pane by opaque ID or positional index, or the active pane when
/// no reference is given.
///
/// Windows are scanned in window order, then panes in pane order; the first
/// match wins.
pub fn resolve_pane<'a>(session: &'a Session, pane_ref: Option<&str>) -> Result<&'a Pane> {
    let pane = match pane_ref {
        Some(wanted) => session
            .windows
            .iter()
            .flat_map(|w| w.panes.iter())
            .find(|p| p.id == wanted || p.index.to_string() == wanted)
            .ok_or_else(|| CtlError::PaneNotFound(wanted.to_string()))?,
        None => session
            .active_window()
            .and_then(Window::active_pane)
            .ok_or(CtlError::NoActivePane)?,
    };
    debug!(session = %session.name, pane = %pane.id, "resolved pane");
    Ok(pane)
}

/// Windows whose name or stringified index equals `window_ref`; all windows
/// when no reference is given.
pub fn resolve_windows<'a>(session: &'a Session, window_ref: Option<&str>) -> Vec<&'a Window> {
    session
        .windows
        .iter()
        .filter(|w| match window_ref {
            Some(r) => w.name == r || w.index.to_string() == r,
            None => true,
        })
        .collect()
}
