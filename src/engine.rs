//! Apply/revert transaction over a hosts table.
//!
//! The engine owns the last persisted document (the snapshot) and the table
//! being edited. Every command returns a `Result`; failures also reach the
//! registered observers as a message, and never leave a partial change.
//!
//! Changes made to the file by other programs between `load` and `apply`
//! are not detected; `apply` overwrites them inside the managed block and
//! keeps the surrounding lines as they were at load time.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::hosts::{render_with, HostsDocument};
use crate::platform::HostsStorage;
use crate::record::Record;
use crate::table::HostTable;

/// Receives notifications from an [`Engine`].
pub trait EngineObserver {
    fn on_error_occurred(&self, message: &str);
    fn on_dirty_changed(&self, _dirty: bool) {}
}

pub struct Engine {
    storage: Box<dyn HostsStorage>,
    snapshot: HostsDocument,
    working: HostTable,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl Engine {
    /// Engine with an empty table; call [`Engine::load`] to read storage.
    pub fn new(storage: Box<dyn HostsStorage>) -> Self {
        Self {
            storage,
            snapshot: HostsDocument::default(),
            working: HostTable::default(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    pub fn storage(&self) -> &dyn HostsStorage {
        self.storage.as_ref()
    }

    /// Read-only view of the table being edited.
    pub fn table(&self) -> &HostTable {
        &self.working
    }

    pub fn snapshot(&self) -> &HostsDocument {
        &self.snapshot
    }

    pub fn dirty(&self) -> bool {
        self.working.is_dirty()
    }

    /// Replace both snapshot and working table with the stored content.
    pub fn load(&mut self) -> Result<()> {
        let loaded = self
            .storage
            .read()
            .and_then(|content| HostsDocument::parse(&content))
            .map_err(|e| match e {
                Error::LoadFailed(_) => e,
                other => Error::LoadFailed(other.to_string()),
            });
        let document = self.report(loaded)?;
        info!(
            path = %self.storage.path().display(),
            records = document.records.len(),
            "loaded hosts table"
        );
        self.mutate(|engine| {
            engine.working = HostTable::new(document.records.clone());
            engine.snapshot = document;
            Ok(())
        })
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        self.mutate(|engine| engine.working.set_enabled(index, enabled))
    }

    pub fn set_address(&mut self, index: usize, candidate: &str) -> Result<()> {
        self.mutate(|engine| engine.working.set_address(index, candidate))
    }

    pub fn set_hostnames(&mut self, index: usize, line: &str) -> Result<()> {
        self.mutate(|engine| engine.working.set_hostnames(index, line))
    }

    /// Append a row and return its index.
    pub fn push_record(&mut self, record: Record) -> usize {
        let before = self.dirty();
        let index = self.working.push_record(record);
        self.notify_dirty(before);
        index
    }

    pub fn remove_record(&mut self, index: usize) -> Result<Record> {
        self.mutate(|engine| engine.working.remove_record(index))
    }

    /// Discard edits. Does nothing when clean.
    pub fn revert(&mut self) -> Result<()> {
        if !self.dirty() {
            return Ok(());
        }
        debug!("reverting working table to snapshot");
        self.mutate(|engine| {
            engine.working = HostTable::new(engine.snapshot.records.clone());
            Ok(())
        })
    }

    /// Content `apply` would write for the current working table.
    pub fn rendered(&self) -> String {
        render_with(
            &self.snapshot.pre_lines,
            &self.snapshot.post_lines,
            self.working.records(),
        )
    }

    /// Validate every enabled record, then write the document atomically.
    /// Does nothing when clean.
    pub fn apply(&mut self) -> Result<()> {
        if !self.dirty() {
            debug!("apply on clean table, nothing to write");
            return Ok(());
        }

        let problem = self
            .working
            .records()
            .iter()
            .enumerate()
            .find_map(|(index, record)| record.commit_problem().map(|field| (index, field)));
        if let Some((index, field)) = problem {
            return self.report(Err(Error::IncompleteRecord { index, field }));
        }

        let content = self.rendered();
        let written = self
            .storage
            .write_atomic(&content)
            .map_err(|e| Error::PersistFailed(e.to_string()));
        self.report(written)?;

        // Snapshot must equal what a reload of `content` yields.
        let records = match HostsDocument::parse(&content) {
            Ok(written) => written.records,
            Err(e) => {
                warn!("re-reading written content failed: {e}");
                self.working
                    .records()
                    .iter()
                    .filter(|r| !r.is_blank())
                    .cloned()
                    .collect()
            }
        };
        info!(
            path = %self.storage.path().display(),
            records = records.len(),
            "applied hosts table"
        );
        self.mutate(|engine| {
            engine.snapshot.records = records.clone();
            engine.working = HostTable::new(records);
            Ok(())
        })
    }

    /// Run `f`, report its error, and notify observers if dirtiness changed.
    fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let before = self.dirty();
        let result = f(self);
        self.notify_dirty(before);
        self.report(result)
    }

    fn notify_dirty(&self, before: bool) {
        let after = self.dirty();
        if before != after {
            debug!(dirty = after, "dirty state changed");
            for observer in &self.observers {
                observer.on_dirty_changed(after);
            }
        }
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            debug!(kind = ?e.kind(), "{e}");
            let message = e.to_string();
            for observer in &self.observers {
                observer.on_error_occurred(&message);
            }
        }
        result
    }
}
