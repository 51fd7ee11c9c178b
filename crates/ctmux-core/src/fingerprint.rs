//! Content fingerprints persisted across invocations.
//!
//! A flat `"{session}:{pane_id}"` → digest table. Reads are lenient: a missing
//! or corrupt table is an empty table. Writes are read-modify-write of one key
//! with no locking, so concurrent writers race and the last one wins.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// File name of the shared table inside the system temp directory.
pub const HASH_FILE_NAME: &str = "ctmux_screen_hashes.json";

/// Storage capability for fingerprint records.
pub trait FingerprintStore {
    /// Full mapping; empty when the backing store is absent or unreadable.
    fn load(&self) -> HashMap<String, String>;
    /// Set one key, leaving every other key untouched.
    fn save(&self, key: &str, hash: &str) -> io::Result<()>;
}

/// JSON object on disk, shared by every invocation on the host.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(HASH_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl FingerprintStore for JsonFileStore {
    fn load(&self) -> HashMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no fingerprint table");
                return HashMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!(path = %self.path.display(), error = %e, "ignoring corrupt fingerprint table");
            HashMap::new()
        })
    }

    fn save(&self, key: &str, hash: &str) -> io::Result<()> {
        let mut table = self.load();
        table.insert(key.to_string(), hash.to_string());
        let json = serde_json::to_string(&table)?;
        std::fs::write(&self.path, json)
    }
}

/// In-process table, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }
}

impl FingerprintStore for MemoryStore {
    fn load(&self) -> HashMap<String, String> {
        self.table
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    fn save(&self, key: &str, hash: &str) -> io::Result<()> {
        let mut table = self
            .table
            .lock()
            .map_err(|_| io::Error::other("fingerprint table lock poisoned"))?;
        table.insert(key.to_string(), hash.to_string());
        Ok(())
    }
}

/// Hex SHA-256 of the captured text.
pub fn fingerprint(content: &str) -> String {
    Sha256::digest(content.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Changed,
    Unchanged,
}

/// Compare `content` against the stored digest for `key`.
///
/// Unchanged content leaves the store alone. Changed or unseen content is
/// recorded; a failed write is logged and still reported as `Changed`.
pub fn detect_change<S: FingerprintStore + ?Sized>(
    store: &S,
    key: &str,
    content: &str,
) -> ChangeStatus {
    let digest = fingerprint(content);
    if store.load().get(key) == Some(&digest) {
        debug!(key = %key, "content unchanged");
        return ChangeStatus::Unchanged;
    }
    if let Err(e) = store.save(key, &digest) {
        warn!(key = %key, error = %e, "failed to persist fingerprint");
    }
    ChangeStatus::Changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = fingerprint("hello");
        assert_eq!(a.len(), 64);
        assert_eq!(a, fingerprint("hello"));
        assert_ne!(a, fingerprint("hello "));
        assert_eq!(
            a,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn first_changed_then_unchanged() {
        let store = MemoryStore::new();
        assert_eq!(detect_change(&store, "work:%0", "hello"), ChangeStatus::Changed);
        assert_eq!(detect_change(&store, "work:%0", "hello"), ChangeStatus::Unchanged);
    }

    #[test]
    fn different_content_updates_hash() {
        let store = MemoryStore::new();
        detect_change(&store, "work:%0", "hello");
        assert_eq!(detect_change(&store, "work:%0", "world"), ChangeStatus::Changed);
        assert_eq!(store.get("work:%0"), Some(fingerprint("world")));
    }

    #[test]
    fn keys_are_independent() {
        let store = MemoryStore::new();
        detect_change(&store, "work:%0", "same");
        assert_eq!(detect_change(&store, "work:%1", "same"), ChangeStatus::Changed);
        assert_eq!(detect_change(&store, "play:%0", "same"), ChangeStatus::Changed);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hashes.json");
        std::fs::write(&path, "{not json").expect("write");
        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
        // Still usable: a save replaces the garbage.
        store.save("work:%0", "abc").expect("save");
        assert_eq!(store.load().get("work:%0").map(String::as_str), Some("abc"));
    }

    #[test]
    fn file_store_save_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("hashes.json"));
        store.save("work:%0", "aaa").expect("save");
        store.save("play:%1", "bbb").expect("save");
        store.save("work:%0", "ccc").expect("save");
        let table = store.load();
        assert_eq!(table.len(), 2);
        assert_eq!(table["work:%0"], "ccc");
        assert_eq!(table["play:%1"], "bbb");
    }

    #[test]
    fn file_store_survives_new_instance() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hashes.json");
        assert_eq!(
            detect_change(&JsonFileStore::new(&path), "work:%0", "hello"),
            ChangeStatus::Changed
        );
        assert_eq!(
            detect_change(&JsonFileStore::new(&path), "work:%0", "hello"),
            ChangeStatus::Unchanged
        );
    }

    #[test]
    fn unwritable_store_still_reports_changed() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory path cannot be written as a file.
        let store = JsonFileStore::new(dir.path());
        assert_eq!(detect_change(&store, "work:%0", "x"), ChangeStatus::Changed);
        assert_eq!(detect_change(&store, "work:%0", "x"), ChangeStatus::Changed);
    }

    #[test]
    fn default_path_in_temp_dir() {
        let store = JsonFileStore::default();
        assert_eq!(store.path(), std::env::temp_dir().join(HASH_FILE_NAME));
    }
}
