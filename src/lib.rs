//! lhm - edit the managed block of an /etc/hosts-style file with
//! validated, transactional apply and revert.

pub mod cli;
pub mod config;
pub mod doctor;
pub mod engine;
pub mod error;
pub mod hosts;
pub mod platform;
pub mod record;
pub mod table;
pub mod validate;

pub use engine::{Engine, EngineObserver};
pub use error::{Error, ErrorKind, Field, Result};
pub use record::Record;
pub use table::HostTable;
