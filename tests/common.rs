//! Shared test helpers.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lhm::platform::HostsStorage;
use lhm::{Engine, EngineObserver, Error};
use tempfile::TempDir;

pub const SAMPLE: &str = "127.0.0.1 localhost
::1 localhost

# === BEGIN MANAGED BY LHM ===
10.0.0.1\thost1
#10.0.0.2\thost2 alias2
# === END MANAGED BY LHM ===
# trailing comment
";

/// Create a temp directory for hosts and config files.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("lhm_test_")
        .tempdir()
        .expect("temp dir")
}

/// In-memory storage; clones share content, write counter and failure switch.
#[derive(Clone)]
pub struct MemoryStorage {
    path: PathBuf,
    content: Arc<Mutex<Option<String>>>,
    writes: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new(content: &str) -> Self {
        Self {
            path: PathBuf::from("memory/hosts"),
            content: Arc::new(Mutex::new(Some(content.to_string()))),
            writes: Arc::new(AtomicUsize::new(0)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Storage whose reads fail as if the file did not exist.
    pub fn missing() -> Self {
        let s = Self::new("");
        *s.content.lock().unwrap() = None;
        s
    }

    pub fn content(&self) -> String {
        self.content.lock().unwrap().clone().unwrap_or_default()
    }

    pub fn set_content(&self, content: &str) {
        *self.content.lock().unwrap() = Some(content.to_string());
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl HostsStorage for MemoryStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> lhm::Result<String> {
        self.content.lock().unwrap().clone().ok_or_else(|| Error::ReadFailed {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    fn write_atomic(&self, content: &str) -> lhm::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::WriteFailed {
                path: self.path.clone(),
                reason: "disk full".to_string(),
            });
        }
        *self.content.lock().unwrap() = Some(content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Engine loaded from [`SAMPLE`], plus a handle on its storage.
pub fn loaded_engine() -> (Engine, MemoryStorage) {
    let storage = MemoryStorage::new(SAMPLE);
    let mut engine = Engine::new(Box::new(storage.clone()));
    engine.load().unwrap();
    (engine, storage)
}

/// Observer that records every notification.
#[derive(Clone, Default)]
pub struct Recorder {
    pub errors: Arc<Mutex<Vec<String>>>,
    pub dirty: Arc<Mutex<Vec<bool>>>,
}

impl Recorder {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn dirty(&self) -> Vec<bool> {
        self.dirty.lock().unwrap().clone()
    }
}

impl EngineObserver for Recorder {
    fn on_error_occurred(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn on_dirty_changed(&self, dirty: bool) {
        self.dirty.lock().unwrap().push(dirty);
    }
}
