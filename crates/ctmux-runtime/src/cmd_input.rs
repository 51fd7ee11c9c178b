//! `ctmux send`, `ctmux type`, `ctmux mouse`: input injection.

use ctmux_core::{Injector, MouseButton, SystemClock};

use crate::cli::{MouseOpts, SendOpts, TypeOpts};
use crate::context::Context;

/// Entry point for `ctmux send`.
pub fn cmd_send(ctx: &Context, opts: &SendOpts) -> anyhow::Result<()> {
    let target = ctx.server.target(&opts.session, opts.pane.as_deref())?;
    let clock = SystemClock::new();
    let joined = Injector::new(ctx.server.runner(), &clock, target.pane.id)
        .send(&opts.keys, opts.literal, opts.enter)?;
    println!("Sent: {joined}");
    Ok(())
}

/// Entry point for `ctmux type`.
pub fn cmd_type(ctx: &Context, opts: &TypeOpts) -> anyhow::Result<()> {
    let target = ctx.server.target(&opts.session, opts.pane.as_deref())?;
    let clock = SystemClock::new();
    Injector::new(ctx.server.runner(), &clock, target.pane.id).type_text(
        &opts.text,
        opts.enter,
        opts.delay,
    )?;
    println!("{}", typed_message(&opts.text, opts.enter));
    Ok(())
}

/// Entry point for `ctmux mouse`.
pub fn cmd_mouse(ctx: &Context, opts: &MouseOpts) -> anyhow::Result<()> {
    let target = ctx.server.target(&opts.session, opts.pane.as_deref())?;
    let clock = SystemClock::new();
    Injector::new(ctx.server.runner(), &clock, target.pane.id).mouse_click(
        opts.x,
        opts.y,
        opts.button,
        opts.double,
    )?;
    println!("{}", clicked_message(opts.button, opts.x, opts.y, opts.double));
    Ok(())
}

fn typed_message(text: &str, enter: bool) -> String {
    let suffix = if enter { " + Enter" } else { "" };
    format!("Typed: {text:?}{suffix}")
}

fn clicked_message(button: MouseButton, x: u16, y: u16, double: bool) -> String {
    let suffix = if double { " x2" } else { "" };
    format!("Clicked {button} at ({x}, {y}){suffix}")
}
