//! ctmux-core: pane state observation and input injection.
//!
//! Resolves a session name and optional pane reference to a live pane,
//! captures its text, detects change through persisted fingerprints,
//! watches it until a deadline or a marker string, and injects keys,
//! text and mouse clicks.

pub mod capture;
pub mod clock;
pub mod error;
pub mod fingerprint;
pub mod input;
pub mod model;
pub mod resolver;
pub mod server;
pub mod watch;

pub use capture::{Capture, CaptureOutcome, CaptureRange, CaptureRequest, capture, capture_target};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CtlError, Result};
pub use fingerprint::{
    ChangeStatus, FingerprintStore, JsonFileStore, MemoryStore, detect_change, fingerprint,
};
pub use input::{Injector, MouseButton, encode_mouse_event};
pub use model::{Pane, Session, Window, build_sessions};
pub use resolver::{resolve_pane, resolve_session, resolve_windows};
pub use server::{
    NewSessionRequest, PaneSummary, Server, SessionSummary, Target, WindowSummary,
};
pub use watch::{WatchFrame, WatchOptions, WatchOutcome, watch};
