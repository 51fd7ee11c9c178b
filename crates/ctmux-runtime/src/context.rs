//! Per-invocation wiring: tmux executor, server facade and fingerprint store.

use ctmux_core::{JsonFileStore, Server};
use ctmux_tmux::TmuxExecutor;

use crate::cli::TmuxOpts;

pub struct Context {
    pub server: Server<TmuxExecutor>,
    pub store: JsonFileStore,
}

impl Context {
    pub fn from_opts(opts: &TmuxOpts) -> Self {
        Self {
            server: Server::new(executor(opts)),
            store: opts
                .hash_file
                .clone()
                .map(JsonFileStore::new)
                .unwrap_or_default(),
        }
    }
}

fn executor(opts: &TmuxOpts) -> TmuxExecutor {
    let mut exec = TmuxExecutor::new(opts.tmux_bin.as_str());
    if let Some(ref path) = opts.socket_path {
        exec = exec.with_socket_path(path.as_str());
    }
    if let Some(ref name) = opts.socket_name {
        exec = exec.with_socket_name(name.as_str());
    }
    exec
}
