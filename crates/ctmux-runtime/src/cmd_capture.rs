//! `ctmux capture` and `ctmux watch`.

use ctmux_core::{
    CaptureRange, CaptureRequest, SystemClock, WatchOptions, WatchOutcome, capture_target, watch,
};

use crate::cli::{CaptureOpts, WatchOpts};
use crate::context::Context;

/// Entry point for `ctmux capture`.
pub fn cmd_capture(ctx: &Context, opts: &CaptureOpts) -> anyhow::Result<()> {
    let range = if opts.history {
        CaptureRange::History { lines: opts.lines }
    } else {
        CaptureRange::Viewport
    };
    let req = CaptureRequest {
        session: &opts.session,
        pane: opts.pane.as_deref(),
        range,
        if_changed: opts.if_changed,
    };
    let outcome = capture_target(&ctx.server, &ctx.store, &req)?;
    println!("{}", outcome.render(opts.raw));
    Ok(())
}

/// Entry point for `ctmux watch`. Frames go to stdout as they change; the
/// closing status line goes to stderr. A timeout is not an error.
pub fn cmd_watch(ctx: &Context, opts: &WatchOpts) -> anyhow::Result<()> {
    let target = ctx.server.target(&opts.session, opts.pane.as_deref())?;
    let watch_opts = WatchOptions::from_secs(opts.interval, opts.timeout, opts.until.clone());
    let clock = SystemClock::new();

    let outcome = watch(
        ctx.server.runner(),
        &target.pane.id,
        &watch_opts,
        &clock,
        |frame| println!("{}", frame.render()),
    )?;
    eprintln!("{}", status_line(&outcome, opts));
    Ok(())
}

fn status_line(outcome: &WatchOutcome, opts: &WatchOpts) -> String {
    match outcome {
        WatchOutcome::Matched { .. } => {
            format!("[found '{}']", opts.until.as_deref().unwrap_or_default())
        }
        // Debug keeps the fractional part: `30.0s`, not `30s`.
        WatchOutcome::TimedOut { .. } => format!("[timeout after {:?}s]", opts.timeout),
    }
}
