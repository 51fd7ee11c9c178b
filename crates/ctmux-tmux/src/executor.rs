//! TmuxCommandRunner trait and TmuxExecutor (sync subprocess wrapper).
//! The trait is the seam every higher layer is tested through.

use tracing::trace;

use crate::error::TmuxError;

/// Trait for executing tmux commands. Enables mock injection for testing.
pub trait TmuxCommandRunner: Send + Sync {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }
}

/// Real tmux executor using `std::process::Command`.
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    tmux_bin: String,
    socket_path: Option<String>,
    socket_name: Option<String>,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_path: None,
            socket_name: None,
        }
    }

    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    /// Full argv (without the binary) for one invocation.
    fn argv<'a>(&'a self, args: &[&'a str]) -> Vec<&'a str> {
        let mut argv = Vec::with_capacity(args.len() + 2);
        // Socket path takes precedence over socket name
        if let Some(ref path) = self.socket_path {
            argv.extend(["-S", path.as_str()]);
        } else if let Some(ref name) = self.socket_name {
            argv.extend(["-L", name.as_str()]);
        }
        argv.extend_from_slice(args);
        argv
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let argv = self.argv(args);
        trace!(bin = %self.tmux_bin, args = ?argv, "running tmux command");
        let output = std::process::Command::new(&self.tmux_bin)
            .args(&argv)
            .output()
            .map_err(TmuxError::Io)?;
        trace!(
            status = %output.status,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "tmux command completed"
        );
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(output.status.code(), stderr.trim()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Map a failed invocation's stderr onto the error kinds callers branch on.
pub(crate) fn classify_failure(code: Option<i32>, stderr: &str) -> TmuxError {
    if stderr.contains("no server running") || stderr.contains("error connecting to") {
        TmuxError::NoServer(stderr.to_string())
    } else if stderr.contains("can't find pane") {
        TmuxError::PaneGone(stderr.to_string())
    } else {
        TmuxError::CommandFailed(format!("exit code {}: {}", code.unwrap_or(-1), stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_executor() {
        let exec = TmuxExecutor::default();
        assert_eq!(exec.tmux_bin, "tmux");
        assert!(exec.socket_path.is_none());
        assert!(exec.socket_name.is_none());
    }

    #[test]
    fn socket_path_wins_over_name() {
        let exec = TmuxExecutor::default()
            .with_socket_name("ctl")
            .with_socket_path("/tmp/my.sock");
        assert_eq!(exec.argv(&["list-panes"]), ["-S", "/tmp/my.sock", "list-panes"]);
    }

    #[test]
    fn socket_name_prefix() {
        let exec = TmuxExecutor::default().with_socket_name("ctl");
        assert_eq!(exec.argv(&["kill-session"]), ["-L", "ctl", "kill-session"]);
    }

    #[test]
    fn no_socket_passes_args_through() {
        let exec = TmuxExecutor::new("/usr/bin/tmux");
        assert_eq!(exec.argv(&["a", "b"]), ["a", "b"]);
    }

    #[test]
    fn classify_no_server() {
        let err = classify_failure(Some(1), "no server running on /tmp/tmux-1000/default");
        assert!(matches!(err, TmuxError::NoServer(_)));
        let err = classify_failure(
            Some(1),
            "error connecting to /tmp/tmux-1000/default (No such file or directory)",
        );
        assert!(matches!(err, TmuxError::NoServer(_)));
    }

    #[test]
    fn classify_pane_gone() {
        let err = classify_failure(Some(1), "can't find pane: %42");
        assert!(matches!(err, TmuxError::PaneGone(_)));
    }

    #[test]
    fn classify_other_failure_keeps_exit_code() {
        let err = classify_failure(Some(2), "duplicate session: work");
        match err {
            TmuxError::CommandFailed(msg) => {
                assert_eq!(msg, "exit code 2: duplicate session: work");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blanket_ref_impl() {
        struct Mock;
        impl TmuxCommandRunner for Mock {
            fn run(&self, _args: &[&str]) -> Result<String, TmuxError> {
                Ok("ok".to_string())
            }
        }
        let mock = Mock;
        let r: &Mock = &mock;
        assert_eq!(r.run(&[]).expect("ok"), "ok");
    }
}
