//! Input injection: keys, paced text and mouse clicks.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ctmux_tmux::{TmuxCommandRunner, send_keys, send_literal};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{CtlError, Result};

/// Button code tmux-style X10 reports use for "button released".
pub const MOUSE_RELEASE_CODE: u8 = 3;

/// Gap between the two clicks of a double click.
pub const DOUBLE_CLICK_GAP: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn code(self) -> u8 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Middle => "middle",
            MouseButton::Right => "right",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MouseButton {
    type Err = CtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            other => Err(CtlError::InvalidInput(format!(
                "unknown mouse button {other:?} (expected left, middle or right)"
            ))),
        }
    }
}

/// Largest value an X10 report byte may carry. Above it the char would be
/// sent as a multi-byte UTF-8 sequence.
const MAX_REPORT_BYTE: u16 = 0x7f;

/// Encode one X10 mouse report: `ESC [ M <code+32> <x+33> <y+33>`.
///
/// `x`/`y` are 0-based cells; the `+33` offset yields the protocol's 1-based
/// coordinates above the printable-space base. Each value is one ASCII byte,
/// so columns and rows are limited to 94.
pub fn encode_mouse_event(code: u8, x: u16, y: u16) -> Result<String> {
    let byte = |value: u16, offset: u16, what: &str| -> Result<char> {
        value
            .checked_add(offset)
            .filter(|v| *v <= MAX_REPORT_BYTE)
            .and_then(|v| u8::try_from(v).ok())
            .map(char::from)
            .ok_or_else(|| {
                CtlError::InvalidInput(format!(
                    "{what} {value} is out of range for mouse reporting (max {})",
                    MAX_REPORT_BYTE - offset
                ))
            })
    };
    let cb = byte(u16::from(code), 32, "button code")?;
    let cx = byte(x, 33, "column")?;
    let cy = byte(y, 33, "row")?;
    Ok(format!("\x1b[M{cb}{cx}{cy}"))
}

/// Submits input to one pane.
pub struct Injector<'a, R, C: ?Sized> {
    runner: &'a R,
    clock: &'a C,
    pane_id: String,
}

impl<'a, R, C> Injector<'a, R, C>
where
    R: TmuxCommandRunner,
    C: Clock + ?Sized,
{
    pub fn new(runner: &'a R, clock: &'a C, pane_id: impl Into<String>) -> Self {
        Self {
            runner,
            clock,
            pane_id: pane_id.into(),
        }
    }

    /// Join `keys` with spaces, append `Enter` if asked, and submit once.
    ///
    /// Literal mode sends the joined string byte-for-byte. Parsed mode lets
    /// tmux translate key names; the spaces between tokens travel as `Space`
    /// keys so the resulting byte stream is still the joined string.
    /// Returns the joined string.
    pub fn send<S: AsRef<str>>(&self, keys: &[S], literal: bool, enter: bool) -> Result<String> {
        let mut joined = keys
            .iter()
            .map(|k| k.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        if enter {
            joined.push_str(" Enter");
        }
        debug!(pane = %self.pane_id, keys = %joined, literal, "sending keys");
        if literal {
            send_literal(self.runner, &self.pane_id, &joined)?;
        } else {
            send_keys(self.runner, &self.pane_id, &parsed_args(&joined))?;
        }
        Ok(joined)
    }

    /// Type `text` literally. With `delay_ms > 0` every character is its own
    /// submission with a pause between characters; otherwise one submission.
    pub fn type_text(&self, text: &str, enter: bool, delay_ms: u64) -> Result<()> {
        debug!(pane = %self.pane_id, chars = text.chars().count(), delay_ms, "typing text");
        if delay_ms > 0 {
            let delay = Duration::from_millis(delay_ms);
            let mut buf = [0u8; 4];
            for (i, ch) in text.chars().enumerate() {
                if i > 0 {
                    self.clock.sleep(delay);
                }
                send_literal(self.runner, &self.pane_id, ch.encode_utf8(&mut buf))?;
            }
        } else {
            send_literal(self.runner, &self.pane_id, text)?;
        }
        if enter {
            send_keys(self.runner, &self.pane_id, &["Enter"])?;
        }
        Ok(())
    }

    /// Click at cell `(x, y)`: press then release, twice for a double click.
    pub fn mouse_click(&self, x: u16, y: u16, button: MouseButton, double: bool) -> Result<()> {
        let press = encode_mouse_event(button.code(), x, y)?;
        let release = encode_mouse_event(MOUSE_RELEASE_CODE, x, y)?;
        debug!(pane = %self.pane_id, x, y, %button, double, "mouse click");

        self.click_once(&press, &release)?;
        if double {
            self.clock.sleep(DOUBLE_CLICK_GAP);
            self.click_once(&press, &release)?;
        }
        Ok(())
    }

    fn click_once(&self, press: &str, release: &str) -> Result<()> {
        send_literal(self.runner, &self.pane_id, press)?;
        send_literal(self.runner, &self.pane_id, release)?;
        Ok(())
    }
}

/// Split a joined key string at its spaces, putting a `Space` key in each gap.
fn parsed_args(joined: &str) -> Vec<&str> {
    let mut args = Vec::new();
    for (i, part) in joined.split(' ').enumerate() {
        if i > 0 {
            args.push("Space");
        }
        if !part.is_empty() {
            args.push(part);
        }
    }
    args
}
