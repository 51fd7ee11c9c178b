//! Watch loop: poll a pane's viewport, emit on change, stop on timeout or marker.

use std::time::Duration;

use ctmux_tmux::TmuxCommandRunner;
use tracing::debug;

use crate::capture::{Capture, CaptureRange, capture};
use crate::clock::Clock;
use crate::error::Result;
use crate::fingerprint::fingerprint;

pub const DEFAULT_INTERVAL_SECS: f64 = 0.5;
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub interval: Duration,
    pub timeout: Duration,
    /// Stop as soon as emitted content contains this text.
    pub until: Option<String>,
}

impl WatchOptions {
    /// Build from seconds. Negative or NaN values clamp to zero; an infinite
    /// timeout never expires.
    pub fn from_secs(interval: f64, timeout: f64, until: Option<String>) -> Self {
        Self {
            interval: secs(interval),
            timeout: secs(timeout),
            until,
        }
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::from_secs(DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, None)
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

/// One emission: content that differs from the previous emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchFrame {
    pub elapsed: Duration,
    pub capture: Capture,
}

impl WatchFrame {
    /// `--- [1.5s] ---` header, content and cursor line.
    pub fn render(&self) -> String {
        format!(
            "--- [{:.1}s] ---\n{}",
            self.elapsed.as_secs_f64(),
            self.capture.render(false)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The `until` text appeared in an emitted frame.
    Matched { emitted: usize, elapsed: Duration },
    /// The timeout elapsed first.
    TimedOut { emitted: usize, elapsed: Duration },
}

/// Poll `pane_id` until `opts.timeout` elapses or `opts.until` appears.
///
/// The timeout is checked before every capture, so a zero timeout returns
/// without touching the pane. Change detection compares against the previous
/// frame only; nothing is persisted.
pub fn watch<R, C, F>(
    runner: &R,
    pane_id: &str,
    opts: &WatchOptions,
    clock: &C,
    mut emit: F,
) -> Result<WatchOutcome>
where
    R: TmuxCommandRunner,
    C: Clock + ?Sized,
    F: FnMut(&WatchFrame),
{
    let start = clock.now();
    let mut last_digest: Option<String> = None;
    let mut emitted = 0usize;

    loop {
        let elapsed = clock.now().saturating_sub(start);
        if elapsed >= opts.timeout {
            debug!(pane = %pane_id, emitted, "watch timed out");
            return Ok(WatchOutcome::TimedOut { emitted, elapsed });
        }

        let captured = capture(runner, pane_id, CaptureRange::Viewport)?;
        let digest = fingerprint(&captured.content);

        if last_digest.as_deref() != Some(digest.as_str()) {
            let frame = WatchFrame {
                elapsed,
                capture: captured,
            };
            emit(&frame);
            emitted += 1;
            last_digest = Some(digest);

            if let Some(ref needle) = opts.until {
                if frame.capture.content.contains(needle.as_str()) {
                    debug!(pane = %pane_id, emitted, "watch matched");
                    return Ok(WatchOutcome::Matched { emitted, elapsed });
                }
            }
        }

        clock.sleep(opts.interval);
    }
}
