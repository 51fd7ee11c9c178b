//! ctmux: observe and drive tmux panes from the command line.
//! Every subcommand is one short-lived, synchronous pass over the tmux server.

use clap::Parser;

mod cli;
mod cmd_capture;
mod cmd_input;
mod cmd_list;
mod cmd_session;
mod context;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr; stdout carries captures and JSON.
    let filter = std::env::var("CTMUX_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let ctx = context::Context::from_opts(&args.tmux);
    tracing::debug!(hash_file = %ctx.store.path().display(), "ctmux starting");

    match args.command {
        cli::Command::List(opts) => cmd_list::cmd_list(&ctx, opts.json)?,
        cli::Command::Windows(opts) => cmd_list::cmd_windows(&ctx, &opts.session, opts.json)?,
        cli::Command::Panes(opts) => {
            cmd_list::cmd_panes(&ctx, &opts.session, opts.window.as_deref(), opts.json)?;
        }
        cli::Command::Capture(opts) => cmd_capture::cmd_capture(&ctx, &opts)?,
        cli::Command::Watch(opts) => cmd_capture::cmd_watch(&ctx, &opts)?,
        cli::Command::Send(opts) => cmd_input::cmd_send(&ctx, &opts)?,
        cli::Command::Type(opts) => cmd_input::cmd_type(&ctx, &opts)?,
        cli::Command::Mouse(opts) => cmd_input::cmd_mouse(&ctx, &opts)?,
        cli::Command::New(opts) => cmd_session::cmd_new(&ctx, &opts)?,
        cli::Command::Kill(opts) => cmd_session::cmd_kill(&ctx, &opts)?,
    }

    Ok(())
}
