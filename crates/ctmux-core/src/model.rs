//! Session → Window → Pane tree rebuilt from a flat `list-panes -a` snapshot.

use chrono::{DateTime, Utc};
use ctmux_tmux::PaneRow;
use serde::Serialize;

/// A single terminal surface within a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pane {
    /// Stable opaque ID (`%N`), valid until the pane is destroyed.
    pub id: String,
    /// Position within the window; changes with layout.
    pub index: u32,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub id: String,
    pub index: u32,
    pub name: String,
    pub active: bool,
    pub panes: Vec<Pane>,
}

impl Window {
    pub fn active_pane(&self) -> Option<&Pane> {
        self.panes.iter().find(|p| p.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub attached: bool,
    pub created: Option<DateTime<Utc>>,
    pub windows: Vec<Window>,
}

impl Session {
    pub fn active_window(&self) -> Option<&Window> {
        self.windows.iter().find(|w| w.active)
    }
}

/// Group pane rows into sessions.
///
/// Sessions keep first-seen order; windows and panes are ordered by index.
pub fn build_sessions(rows: Vec<PaneRow>) -> Vec<Session> {
    let mut sessions: Vec<Session> = Vec::new();

    for row in rows {
        let pane = Pane {
            id: row.pane_id,
            index: row.pane_index,
            width: row.width,
            height: row.height,
            cursor_x: row.cursor_x,
            cursor_y: row.cursor_y,
            active: row.pane_active,
        };

        let session = match sessions.iter().position(|s| s.id == row.session_id) {
            Some(i) => &mut sessions[i],
            None => {
                sessions.push(Session {
                    id: row.session_id,
                    name: row.session_name,
                    attached: row.session_attached,
                    created: row.session_created,
                    windows: Vec::new(),
                });
                let last = sessions.len() - 1;
                &mut sessions[last]
            }
        };

        match session.windows.iter_mut().find(|w| w.id == row.window_id) {
            Some(window) => window.panes.push(pane),
            None => session.windows.push(Window {
                id: row.window_id,
                index: row.window_index,
                name: row.window_name,
                active: row.window_active,
                panes: vec![pane],
            }),
        }
    }

    for session in &mut sessions {
        session.windows.sort_by_key(|w| w.index);
        for window in &mut session.windows {
            window.panes.sort_by_key(|p| p.index);
        }
    }
    sessions
}
