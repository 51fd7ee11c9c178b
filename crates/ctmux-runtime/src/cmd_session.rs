//! `ctmux new` and `ctmux kill`: session lifecycle.

use std::io::{BufRead, Write};

use ctmux_core::{NewSessionRequest, resolve_session};
use tracing::debug;

use crate::cli::{KillOpts, NewOpts};
use crate::context::Context;

/// Entry point for `ctmux new`. The session starts in the current directory.
pub fn cmd_new(ctx: &Context, opts: &NewOpts) -> anyhow::Result<()> {
    let start_dir = std::env::current_dir()?;
    let req = NewSessionRequest {
        name: opts.name.clone(),
        window_name: opts.window.clone(),
        start_dir: start_dir.display().to_string(),
        width: opts.width,
        height: opts.height,
        command: opts.cmd.clone(),
    };
    let pane_id = ctx.server.create_session(&req)?;
    debug!(session = %opts.name, pane = %pane_id, "session created");
    println!("Created session '{}'", opts.name);
    Ok(())
}

/// Entry point for `ctmux kill`. Asks on the terminal unless `--force`.
pub fn cmd_kill(ctx: &Context, opts: &KillOpts) -> anyhow::Result<()> {
    // Fail on an unknown name before prompting.
    resolve_session(&ctx.server.sessions()?, &opts.session)?;

    if !opts.force {
        let prompt = format!("Kill session '{}'?", opts.session);
        let stdin = std::io::stdin();
        if !confirm(&prompt, &mut stdin.lock(), &mut std::io::stderr())? {
            anyhow::bail!("Aborted!");
        }
    }

    ctx.server.kill_session(&opts.session)?;
    println!("Killed session '{}'", opts.session);
    Ok(())
}

/// `y/N` prompt: only an answer starting with `y` or `Y` confirms; an empty
/// answer or end of input declines.
fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> std::io::Result<bool> {
    write!(out, "{prompt} [y/N]: ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim_start().chars().next(), Some('y' | 'Y')))
}
