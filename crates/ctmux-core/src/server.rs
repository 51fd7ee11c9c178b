//! Server facade: fresh topology snapshots, listings and session control.

use chrono::{DateTime, Utc};
use ctmux_tmux::{NewSession, TmuxCommandRunner, list_pane_rows};
use serde::Serialize;
use tracing::debug;

use crate::error::{CtlError, Result};
use crate::model::{Pane, Session, build_sessions};
use crate::resolver::{resolve_pane, resolve_session, resolve_windows};

/// A resolved pane together with the session name it was addressed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub session: String,
    pub pane: Pane,
}

impl Target {
    /// Fingerprint record key: `"{session}:{pane_id}"`.
    pub fn fingerprint_key(&self) -> String {
        format!("{}:{}", self.session, self.pane.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub name: String,
    pub id: String,
    pub windows: usize,
    pub attached: bool,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSummary {
    pub name: String,
    pub id: String,
    pub index: u32,
    pub panes: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneSummary {
    pub id: String,
    pub index: u32,
    pub window: String,
    pub window_index: u32,
    pub width: u16,
    pub height: u16,
    pub active: bool,
}

/// Parameters for [`Server::create_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSessionRequest {
    pub name: String,
    pub window_name: String,
    pub start_dir: String,
    pub width: u16,
    pub height: u16,
    /// Typed into the first pane, followed by Enter.
    pub command: Option<String>,
}

/// Live connection to one tmux server.
///
/// Holds no topology state: every query takes a new snapshot.
#[derive(Debug)]
pub struct Server<R> {
    runner: R,
}

impl<R: TmuxCommandRunner> Server<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Current session → window → pane tree.
    pub fn sessions(&self) -> Result<Vec<Session>> {
        Ok(build_sessions(list_pane_rows(&self.runner)?))
    }

    /// Resolve a session name and optional pane reference to a pane.
    pub fn target(&self, session: &str, pane: Option<&str>) -> Result<Target> {
        let sessions = self.sessions()?;
        let found = resolve_session(&sessions, session)?;
        let pane = resolve_pane(found, pane)?.clone();
        Ok(Target {
            session: found.name.clone(),
            pane,
        })
    }

    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        Ok(self
            .sessions()?
            .into_iter()
            .map(|s| SessionSummary {
                windows: s.windows.len(),
                name: s.name,
                id: s.id,
                attached: s.attached,
                created: s.created,
            })
            .collect())
    }

    pub fn list_windows(&self, session: &str) -> Result<Vec<WindowSummary>> {
        let sessions = self.sessions()?;
        let found = resolve_session(&sessions, session)?;
        Ok(found
            .windows
            .iter()
            .map(|w| WindowSummary {
                name: w.name.clone(),
                id: w.id.clone(),
                index: w.index,
                panes: w.panes.len(),
                active: w.active,
            })
            .collect())
    }

    /// Panes of a session, optionally limited to windows matching `window`
    /// by name or index. An unmatched window filter lists nothing.
    pub fn list_panes(&self, session: &str, window: Option<&str>) -> Result<Vec<PaneSummary>> {
        let sessions = self.sessions()?;
        let found = resolve_session(&sessions, session)?;
        Ok(resolve_windows(found, window)
            .into_iter()
            .flat_map(|w| {
                w.panes.iter().map(move |p| PaneSummary {
                    id: p.id.clone(),
                    index: p.index,
                    window: w.name.clone(),
                    window_index: w.index,
                    width: p.width,
                    height: p.height,
                    active: p.active,
                })
            })
            .collect())
    }

    /// Create a detached session. Returns the ID of its first pane.
    pub fn create_session(&self, req: &NewSessionRequest) -> Result<String> {
        let sessions = self.sessions()?;
        if sessions.iter().any(|s| s.name == req.name) {
            return Err(CtlError::AlreadyExists(req.name.clone()));
        }
        let pane_id = ctmux_tmux::new_session(
            &self.runner,
            &NewSession {
                name: req.name.clone(),
                window_name: req.window_name.clone(),
                start_dir: req.start_dir.clone(),
                width: req.width,
                height: req.height,
            },
        )?;
        if let Some(ref command) = req.command {
            debug!(pane = %pane_id, command = %command, "running initial command");
            ctmux_tmux::send_literal(&self.runner, &pane_id, command)?;
            ctmux_tmux::send_keys(&self.runner, &pane_id, &["Enter"])?;
        }
        Ok(pane_id)
    }

    /// Destroy the session with exactly this name.
    pub fn kill_session(&self, name: &str) -> Result<()> {
        let sessions = self.sessions()?;
        let found = resolve_session(&sessions, name)?;
        // Address by ID: `-t name` would prefix-match other sessions.
        ctmux_tmux::kill_session(&self.runner, &found.id)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use ctmux_tmux::{TmuxCommandRunner, TmuxError};

    /// Scripted tmux: canned list-panes output, per-pane screen and cursor,
    /// and a log of every invocation.
    #[derive(Default)]
    pub(crate) struct FakeTmux {
        pub(crate) rows: Mutex<String>,
        pub(crate) screens: Mutex<HashMap<String, Vec<String>>>,
        pub(crate) cursors: Mutex<HashMap<String, (u16, u16)>>,
        pub(crate) calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeTmux {
        /// One session `work`, one window, one pane `%0` showing `hello`.
        pub(crate) fn single_pane(screen: &str, cursor: (u16, u16)) -> Self {
            let fake = Self::default();
            *fake.rows.lock().expect("lock") =
                "$0\twork\t0\t1706000000\t@0\t0\tmain\t1\t%0\t0\t1\t80\t24\t5\t0\n".to_string();
            fake.set_screen("%0", screen, cursor);
            fake
        }

        pub(crate) fn set_screen(&self, pane: &str, screen: &str, cursor: (u16, u16)) {
            self.screens.lock().expect("lock").insert(
                pane.to_string(),
                screen.lines().map(String::from).collect(),
            );
            self.cursors
                .lock()
                .expect("lock")
                .insert(pane.to_string(), cursor);
        }

        pub(crate) fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().expect("lock").clone()
        }

        /// Invocations whose first argument is `cmd`.
        pub(crate) fn calls_to(&self, cmd: &str) -> Vec<Vec<String>> {
            self.calls().into_iter().filter(|c| c[0] == cmd).collect()
        }

        fn pane_arg(args: &[&str]) -> String {
            let at = args.iter().position(|a| *a == "-t").expect("-t");
            args[at + 1].to_string()
        }
    }

    impl TmuxCommandRunner for FakeTmux {
        fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
            self.calls
                .lock()
                .expect("lock")
                .push(args.iter().map(|s| s.to_string()).collect());
            let gone = |pane: &str| TmuxError::PaneGone(format!("can't find pane: {pane}"));
            match args[0] {
                "list-panes" => Ok(self.rows.lock().expect("lock").clone()),
                "capture-pane" => {
                    let pane = Self::pane_arg(args);
                    let screens = self.screens.lock().expect("lock");
                    let lines = screens.get(&pane).ok_or_else(|| gone(&pane))?;
                    Ok(lines.iter().map(|l| format!("{l}\n")).collect())
                }
                "display-message" => {
                    let pane = Self::pane_arg(args);
                    let cursors = self.cursors.lock().expect("lock");
                    let (x, y) = cursors.get(&pane).ok_or_else(|| gone(&pane))?;
                    Ok(format!("{x}\t{y}\n"))
                }
                "send-keys" => {
                    let pane = Self::pane_arg(args);
                    if self.screens.lock().expect("lock").contains_key(&pane) {
                        Ok(String::new())
                    } else {
                        Err(gone(&pane))
                    }
                }
                "new-session" => Ok("%9\n".to_string()),
                _ => Ok(String::new()),
            }
        }
    }
}
