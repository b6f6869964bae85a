//! Ordered, editable collection of records with dirty tracking.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::record::Record;

/// Records being edited, compared against the reference they were built from.
///
/// `diverged` holds the indices whose record differs from the reference at
/// the same position. It is only meaningful while both sides have the same
/// length; a count change re-derives it.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    records: Vec<Record>,
    reference: Vec<Record>,
    diverged: BTreeSet<usize>,
}

impl HostTable {
    /// Clean table whose reference snapshot is `records`.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            reference: records.clone(),
            records,
            diverged: BTreeSet::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn reference(&self) -> &[Record] {
        &self.reference
    }

    /// True iff the records differ structurally from the reference.
    pub fn is_dirty(&self) -> bool {
        self.records.len() != self.reference.len() || !self.diverged.is_empty()
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        self.record_mut(index)?.set_enabled(enabled);
        self.refresh_row(index);
        Ok(())
    }

    pub fn set_address(&mut self, index: usize, candidate: &str) -> Result<()> {
        self.record_mut(index)?.set_address(candidate)?;
        self.refresh_row(index);
        Ok(())
    }

    pub fn set_hostnames(&mut self, index: usize, line: &str) -> Result<()> {
        self.record_mut(index)?.set_hostnames(line)?;
        self.refresh_row(index);
        Ok(())
    }

    /// Append a row; returns its index.
    pub fn push_record(&mut self, record: Record) -> usize {
        self.records.push(record);
        self.rebuild_diverged();
        self.records.len() - 1
    }

    pub fn remove_record(&mut self, index: usize) -> Result<Record> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        self.rebuild_diverged();
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut Record> {
        self.check_index(index)?;
        Ok(&mut self.records[index])
    }

    fn refresh_row(&mut self, index: usize) {
        if self.records.len() != self.reference.len() {
            return;
        }
        if self.records[index] == self.reference[index] {
            self.diverged.remove(&index);
        } else {
            self.diverged.insert(index);
        }
    }

    fn rebuild_diverged(&mut self) {
        self.diverged = self
            .records
            .iter()
            .zip(&self.reference)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
    }
}

/// Structural equality over the records only; the reference is bookkeeping.
impl PartialEq for HostTable {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for HostTable {}
