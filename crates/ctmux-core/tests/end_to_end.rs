use std::sync::Mutex;

use ctmux_core::{
    CaptureOutcome, CaptureRange, CaptureRequest, CtlError, Injector, JsonFileStore,
    ManualClock, MemoryStore, MouseButton, Server, WatchOptions, WatchOutcome, capture_target,
    watch,
};
use ctmux_tmux::{TmuxCommandRunner, TmuxError};

/// In-memory tmux with one session `work`, one window, one pane `%0`.
/// Literal input is appended to the pane's screen, so typing is observable.
struct OnePaneTmux {
    screen: Mutex<String>,
    cursor: (u16, u16),
    sent: Mutex<Vec<Vec<String>>>,
}

impl OnePaneTmux {
    fn new(screen: &str, cursor: (u16, u16)) -> Self {
        Self {
            screen: Mutex::new(screen.to_string()),
            cursor,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<Vec<String>> {
        self.sent.lock().expect("lock").clone()
    }
}

impl TmuxCommandRunner for OnePaneTmux {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let target = args
            .iter()
            .position(|a| *a == "-t")
            .map(|i| args[i + 1]);
        if matches!(target, Some(t) if t != "%0") {
            return Err(TmuxError::PaneGone(format!(
                "can't find pane: {}",
                target.unwrap_or_default()
            )));
        }
        match args[0] {
            "list-panes" => Ok(format!(
                "$0\twork\t1\t1706000000\t@0\t0\tmain\t1\t%0\t0\t1\t80\t24\t{}\t{}\n",
                self.cursor.0, self.cursor.1
            )),
            "capture-pane" => Ok(format!("{}\n", self.screen.lock().expect("lock"))),
            "display-message" => Ok(format!("{}\t{}\n", self.cursor.0, self.cursor.1)),
            "send-keys" => {
                self.sent
                    .lock()
                    .expect("lock")
                    .push(args.iter().map(|s| s.to_string()).collect());
                if args.contains(&"-l") {
                    let text = args[args.len() - 1];
                    self.screen.lock().expect("lock").push_str(text);
                }
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }
}

#[test]
fn capture_then_no_change() {
    let server = Server::new(OnePaneTmux::new("hello", (5, 0)));
    let store = MemoryStore::new();

    let plain = CaptureRequest {
        session: "work",
        ..Default::default()
    };
    let out = capture_target(&server, &store, &plain).expect("capture");
    assert_eq!(out.render(false), "hello\n[cursor: 5,0]");

    let if_changed = CaptureRequest {
        session: "work",
        if_changed: true,
        ..Default::default()
    };
    let first = capture_target(&server, &store, &if_changed).expect("capture");
    assert_eq!(first.render(false), "hello\n[cursor: 5,0]");
    let second = capture_target(&server, &store, &if_changed).expect("capture");
    assert_eq!(second.render(false), "[no change]");
}

#[test]
fn blank_rows_below_content_are_not_captured() {
    let server = Server::new(OnePaneTmux::new("hello\n\n\n\n", (5, 0)));
    let req = CaptureRequest {
        session: "work",
        ..Default::default()
    };
    let out = capture_target(&server, &MemoryStore::new(), &req).expect("capture");
    assert_eq!(out.render(false), "hello\n[cursor: 5,0]");
}

#[test]
fn change_detection_persists_across_store_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hashes.json");
    let server = Server::new(OnePaneTmux::new("hello", (5, 0)));
    let req = CaptureRequest {
        session: "work",
        pane: Some("%0"),
        range: CaptureRange::Viewport,
        if_changed: true,
    };

    let first = capture_target(&server, &JsonFileStore::new(&path), &req).expect("capture");
    assert!(matches!(first, CaptureOutcome::Captured(_)));
    let second = capture_target(&server, &JsonFileStore::new(&path), &req).expect("capture");
    assert_eq!(second, CaptureOutcome::Unchanged);

    let table: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert!(table["work:%0"].is_string());
}

#[test]
fn typed_text_shows_up_in_watch() {
    let server = Server::new(OnePaneTmux::new("$ ", (2, 0)));
    let clock = ManualClock::new();
    let target = server.target("work", None).expect("target");

    Injector::new(server.runner(), &clock, &target.pane.id)
        .type_text("make", true, 0)
        .expect("type");

    let opts = WatchOptions::from_secs(0.5, 5.0, Some("make".to_string()));
    let mut frames = Vec::new();
    let outcome = watch(server.runner(), &target.pane.id, &opts, &clock, |f| {
        frames.push(f.capture.content.clone())
    })
    .expect("watch");
    assert!(matches!(outcome, WatchOutcome::Matched { emitted: 1, .. }));
    assert_eq!(frames, ["$ make"]);
}

#[test]
fn mouse_click_reaches_resolved_pane() {
    let server = Server::new(OnePaneTmux::new("", (0, 0)));
    let clock = ManualClock::new();
    let target = server.target("work", Some("0")).expect("target");
    Injector::new(server.runner(), &clock, &target.pane.id)
        .mouse_click(0, 0, MouseButton::Left, true)
        .expect("click");
    let sent = server.runner().sent();
    assert_eq!(sent.len(), 4);
    assert!(sent.iter().all(|c| c[2] == "%0" && c.contains(&"-l".to_string())));
}

#[test]
fn unknown_targets() {
    let server = Server::new(OnePaneTmux::new("", (0, 0)));
    assert!(matches!(
        server.target("play", None),
        Err(CtlError::SessionNotFound(_))
    ));
    assert!(matches!(
        server.target("work", Some("%7")),
        Err(CtlError::PaneNotFound(_))
    ));
}

#[test]
fn input_to_vanished_pane_is_pane_gone() {
    let server = Server::new(OnePaneTmux::new("", (0, 0)));
    let clock = ManualClock::new();
    let err = Injector::new(server.runner(), &clock, "%3")
        .send(&["C-c"], false, false)
        .unwrap_err();
    assert!(matches!(err, CtlError::PaneGone(_)));
}
