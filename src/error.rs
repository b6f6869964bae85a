//! Error taxonomy for hosts-table operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which field of a record failed commit validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    Hostnames,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Address => f.write_str("address"),
            Field::Hostnames => f.write_str("hostnames"),
        }
    }
}

/// Coarse classification of [`Error`], stable for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidAddress,
    InvalidHostList,
    IndexOutOfRange,
    IncompleteRecord,
    LoadFailed,
    PersistFailed,
    ReadFailed,
    WriteFailed,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid IP address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid host list: {0:?}")]
    InvalidHostList(String),

    #[error("row {index} out of range (table has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("row {index} is enabled but its {field} is missing or invalid")]
    IncompleteRecord { index: usize, field: Field },

    #[error("failed to load hosts table: {0}")]
    LoadFailed(String),

    #[error("failed to save hosts table: {0}")]
    PersistFailed(String),

    #[error("cannot read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidAddress(_) => ErrorKind::InvalidAddress,
            Error::InvalidHostList(_) => ErrorKind::InvalidHostList,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::IncompleteRecord { .. } => ErrorKind::IncompleteRecord,
            Error::LoadFailed(_) => ErrorKind::LoadFailed,
            Error::PersistFailed(_) => ErrorKind::PersistFailed,
            Error::ReadFailed { .. } => ErrorKind::ReadFailed,
            Error::WriteFailed { .. } => ErrorKind::WriteFailed,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
