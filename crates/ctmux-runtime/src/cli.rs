//! CLI definition using clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ctmux_core::MouseButton;
use ctmux_core::watch::{DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(
    name = "ctmux",
    version,
    about = "Observe and drive tmux panes: capture, watch, send keys, click"
)]
pub struct Cli {
    #[command(flatten)]
    pub tmux: TmuxOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Which tmux server to talk to and where change fingerprints live.
#[derive(clap::Args, Debug, Clone)]
pub struct TmuxOpts {
    /// tmux binary
    #[arg(long, global = true, env = "CTMUX_TMUX_BIN", default_value = "tmux")]
    pub tmux_bin: String,

    /// tmux socket name (tmux -L)
    #[arg(long, short = 'L', global = true, env = "CTMUX_SOCKET_NAME")]
    pub socket_name: Option<String>,

    /// tmux socket path (tmux -S); wins over --socket-name
    #[arg(long, short = 'S', global = true, env = "CTMUX_SOCKET_PATH")]
    pub socket_path: Option<String>,

    /// Fingerprint file used by `capture --if-changed`
    /// (default: $TMPDIR/ctmux_screen_hashes.json)
    #[arg(long, global = true, env = "CTMUX_HASH_FILE")]
    pub hash_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all tmux sessions
    List(ListOpts),
    /// List windows in a session
    Windows(WindowsOpts),
    /// List panes in a session or window
    Panes(PanesOpts),
    /// Capture pane contents (visible rows plus cursor position by default)
    Capture(CaptureOpts),
    /// Watch a pane, printing only when its content changes
    Watch(WatchOpts),
    /// Send keys to a pane (Enter, Escape, C-c ... are key names)
    Send(SendOpts),
    /// Type text into a pane, character for character
    Type(TypeOpts),
    /// Click at a cell of a pane
    Mouse(MouseOpts),
    /// Create a detached session
    New(NewOpts),
    /// Kill a session
    Kill(KillOpts),
}

#[derive(clap::Args)]
pub struct ListOpts {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct WindowsOpts {
    pub session: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct PanesOpts {
    pub session: String,

    /// Window name or index
    #[arg(long, short = 'w')]
    pub window: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct CaptureOpts {
    pub session: String,

    /// Pane ID (%3) or index
    #[arg(long, short = 'p')]
    pub pane: Option<String>,

    /// Scrollback lines to include with --history
    #[arg(long, short = 'n', default_value_t = 50)]
    pub lines: u32,

    /// Print `[no change]` when the pane looks as it did last time
    #[arg(long)]
    pub if_changed: bool,

    /// Include scrollback history
    #[arg(long, short = 'H')]
    pub history: bool,

    /// Omit the cursor metadata line
    #[arg(long, short = 'r')]
    pub raw: bool,
}

#[derive(clap::Args)]
pub struct WatchOpts {
    pub session: String,

    /// Pane ID (%3) or index
    #[arg(long, short = 'p')]
    pub pane: Option<String>,

    /// Poll interval in seconds
    #[arg(long, short = 'i', default_value_t = DEFAULT_INTERVAL_SECS, allow_negative_numbers = true)]
    pub interval: f64,

    /// Give up after this many seconds
    #[arg(long, short = 't', default_value_t = DEFAULT_TIMEOUT_SECS, allow_negative_numbers = true)]
    pub timeout: f64,

    /// Stop as soon as this text appears
    #[arg(long, short = 'u')]
    pub until: Option<String>,
}

#[derive(clap::Args)]
pub struct SendOpts {
    pub session: String,

    /// Keys, joined with spaces
    pub keys: Vec<String>,

    /// Pane ID (%3) or index
    #[arg(long, short = 'p')]
    pub pane: Option<String>,

    /// Send the keys as literal text, without key-name lookup
    #[arg(long, short = 'l')]
    pub literal: bool,

    /// Append Enter
    #[arg(long, short = 'e')]
    pub enter: bool,
}

#[derive(clap::Args)]
pub struct TypeOpts {
    pub session: String,

    pub text: String,

    /// Pane ID (%3) or index
    #[arg(long, short = 'p')]
    pub pane: Option<String>,

    /// Press Enter after typing
    #[arg(long, short = 'e')]
    pub enter: bool,

    /// Delay between characters in milliseconds
    #[arg(long, short = 'd', default_value_t = 0)]
    pub delay: u64,
}

#[derive(clap::Args)]
pub struct MouseOpts {
    pub session: String,

    /// Column, 0-based
    pub x: u16,

    /// Row, 0-based
    pub y: u16,

    /// Pane ID (%3) or index
    #[arg(long, short = 'p')]
    pub pane: Option<String>,

    /// left, middle or right
    #[arg(long = "click", default_value = "left")]
    pub button: MouseButton,

    /// Double click
    #[arg(long)]
    pub double: bool,
}

#[derive(clap::Args)]
pub struct NewOpts {
    pub name: String,

    /// Initial window name
    #[arg(long, short = 'w', default_value = "main")]
    pub window: String,

    /// Command typed into the new session, followed by Enter
    #[arg(long, short = 'c')]
    pub cmd: Option<String>,

    #[arg(long, default_value_t = 120)]
    pub width: u16,

    #[arg(long, default_value_t = 40)]
    pub height: u16,
}

#[derive(clap::Args)]
pub struct KillOpts {
    pub session: String,

    /// Kill without asking
    #[arg(long, short = 'f')]
    pub force: bool,
}
