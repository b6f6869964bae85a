//! Platform abstraction for reading and replacing the hosts file.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

#[cfg(unix)]
pub mod unix;

/// Default hosts file location for this platform.
#[cfg(windows)]
pub const SYSTEM_HOSTS_FILE: &str = r"C:\Windows\System32\drivers\etc\hosts";
#[cfg(not(windows))]
pub const SYSTEM_HOSTS_FILE: &str = "/etc/hosts";

/// Storage for the hosts file content.
///
/// `write_atomic` must leave the target either fully old or fully new.
pub trait HostsStorage: Send + Sync {
    /// Location shown in messages.
    fn path(&self) -> &Path;
    fn read(&self) -> Result<String>;
    fn write_atomic(&self, content: &str) -> Result<()>;
}

/// Storage backed by a plain file, replaced by rename from a sibling temp file.
#[derive(Debug, Clone)]
pub struct FileHostsStorage {
    path: PathBuf,
}

impl FileHostsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like [`HostsStorage::write_atomic`] but keeps the raw I/O error so
    /// callers can tell permission failures apart.
    pub fn try_write(&self, content: &str) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let existing = fs::metadata(&self.path).ok();

        let mut tmp = tempfile::Builder::new().prefix(".hosts_").tempfile_in(dir)?;
        if let Some(meta) = &existing {
            tmp.as_file().set_permissions(meta.permissions())?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::MetadataExt;
                // Only root can hand the file to another owner.
                let _ = std::os::unix::fs::fchown(
                    tmp.as_file(),
                    Some(meta.uid()),
                    Some(meta.gid()),
                );
            }
        }
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), bytes = content.len(), "replaced hosts file");
        Ok(())
    }
}

impl HostsStorage for FileHostsStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    /// Reads under a shared advisory lock.
    fn read(&self) -> Result<String> {
        let read_failed = |source: std::io::Error| Error::ReadFailed {
            path: self.path.clone(),
            source,
        };
        let mut file = fs::File::open(&self.path).map_err(read_failed)?;
        fs2::FileExt::lock_shared(&file).map_err(read_failed)?;
        let mut s = String::new();
        file.read_to_string(&mut s).map_err(read_failed)?;
        Ok(s)
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        self.try_write(content).map_err(|e| Error::WriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

/// Storage for the configured hosts file.
/// With `privileged` set on Unix, permission-denied writes retry through pkexec.
pub fn default_hosts_storage(path: PathBuf, privileged: bool) -> Box<dyn HostsStorage> {
    #[cfg(unix)]
    {
        if privileged {
            return Box::new(unix::PkexecHostsStorage::new(path));
        }
    }

    #[cfg(not(unix))]
    let _ = privileged;

    Box::new(FileHostsStorage::new(path))
}
