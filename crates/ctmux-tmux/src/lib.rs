//! ctmux-tmux: tmux backend IO boundary.
//! Provides subprocess execution, topology listing, pane capture,
//! key submission and session create/kill. No business logic, only the IO boundary.

pub mod capture;
pub mod error;
pub mod executor;
pub mod keys;
pub mod session;
pub mod topology;

pub use capture::{capture_pane, cursor_position};
pub use error::TmuxError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use keys::{send_keys, send_literal};
pub use session::{NewSession, kill_session, new_session};
pub use topology::{LIST_PANES_FORMAT, PaneRow, list_pane_rows, parse_list_panes_output};
