//! `ctmux list`, `ctmux windows`, `ctmux panes`: topology listings.

use ctmux_core::{PaneSummary, SessionSummary, WindowSummary};
use serde::Serialize;

use crate::context::Context;

/// Entry point for `ctmux list`.
pub fn cmd_list(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let sessions = ctx.server.list_sessions()?;
    if json {
        return print_json(&sessions);
    }
    println!("{}", format_sessions(&sessions));
    Ok(())
}

/// Entry point for `ctmux windows`.
pub fn cmd_windows(ctx: &Context, session: &str, json: bool) -> anyhow::Result<()> {
    let windows = ctx.server.list_windows(session)?;
    if json {
        return print_json(&windows);
    }
    print_nonempty(&format_windows(&windows));
    Ok(())
}

/// Entry point for `ctmux panes`.
pub fn cmd_panes(
    ctx: &Context,
    session: &str,
    window: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let panes = ctx.server.list_panes(session, window)?;
    if json {
        return print_json(&panes);
    }
    print_nonempty(&format_panes(&panes));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_nonempty(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

fn marker(active: bool) -> &'static str {
    if active { "*" } else { "" }
}

/// `name* (N windows)` per session; `*` marks attached sessions.
pub fn format_sessions(sessions: &[SessionSummary]) -> String {
    if sessions.is_empty() {
        return "No tmux sessions found".to_string();
    }
    sessions
        .iter()
        .map(|s| format!("{}{} ({} windows)", s.name, marker(s.attached), s.windows))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `index: name* (N panes)` per window; `*` marks the active window.
pub fn format_windows(windows: &[WindowSummary]) -> String {
    windows
        .iter()
        .map(|w| format!("{}: {}{} ({} panes)", w.index, w.name, marker(w.active), w.panes))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `%id* [window:index] WxH` per pane; `*` marks each window's active pane.
pub fn format_panes(panes: &[PaneSummary]) -> String {
    panes
        .iter()
        .map(|p| {
            format!(
                "{}{} [{}:{}] {}x{}",
                p.id,
                marker(p.active),
                p.window,
                p.index,
                p.width,
                p.height
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
