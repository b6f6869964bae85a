//! One row of the hosts table.

use crate::error::{Error, Field, Result};
use crate::validate::{validate_address, validate_host_list};

/// Address-to-hostnames mapping with an enabled flag.
///
/// A disabled record is written as a commented-out line, so re-enabling it
/// restores the same mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    pub enabled: bool,
    pub address: String,
    pub hostnames: Vec<String>,
}

impl Record {
    pub fn new(enabled: bool, address: impl Into<String>, hostnames: Vec<String>) -> Self {
        Self {
            enabled,
            address: address.into(),
            hostnames,
        }
    }

    /// Enabled record built from user input, validated the same way as the
    /// field setters.
    pub fn parse(address: &str, hosts: &str) -> Result<Self> {
        let mut record = Record {
            enabled: true,
            ..Record::default()
        };
        record.set_address(address)?;
        record.set_hostnames(hosts)?;
        Ok(record)
    }

    /// Returns true if the flag changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }

    /// Trims and validates `candidate`. On error the address is left as it was.
    pub fn set_address(&mut self, candidate: &str) -> Result<bool> {
        let trimmed = candidate.trim();
        if !validate_address(trimmed) {
            return Err(Error::InvalidAddress(candidate.to_string()));
        }
        if self.address == trimmed {
            return Ok(false);
        }
        self.address = trimmed.to_string();
        Ok(true)
    }

    /// Tokenizes `line` on whitespace, preserving the typed order.
    pub fn set_hostnames(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();
        if !validate_host_list(trimmed) {
            return Err(Error::InvalidHostList(line.to_string()));
        }
        let hostnames: Vec<String> = trimmed.split_whitespace().map(String::from).collect();
        if self.hostnames == hostnames {
            return Ok(false);
        }
        self.hostnames = hostnames;
        Ok(true)
    }

    /// No address and no hostnames; such rows are never persisted.
    pub fn is_blank(&self) -> bool {
        self.address.is_empty() && self.hostnames.is_empty()
    }

    /// Aliases joined by single spaces, as shown for editing.
    pub fn hosts_line(&self) -> String {
        self.hostnames.join(" ")
    }

    /// First field that keeps this record from being committed, if any.
    /// Disabled records are exempt.
    pub fn commit_problem(&self) -> Option<Field> {
        if !self.enabled {
            return None;
        }
        if self.address.is_empty() || !validate_address(&self.address) {
            return Some(Field::Address);
        }
        if self.hostnames.is_empty() {
            return Some(Field::Hostnames);
        }
        None
    }
}
