//! Unix (Linux, macOS) hosts storage with a pkexec fallback.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use super::{FileHostsStorage, HostsStorage};
use crate::error::{Error, Result};

const PKEXEC: &str = "/usr/bin/pkexec";

/// Writes directly when permitted, otherwise asks polkit for root and
/// replaces the file from a root-owned temp file.
pub struct PkexecHostsStorage {
    file: FileHostsStorage,
}

impl PkexecHostsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FileHostsStorage::new(path),
        }
    }

    /// Shell script run as root: temp file next to the target, then rename.
    fn script(&self) -> String {
        let path = self.file.path();
        let dir = path.parent().unwrap_or_else(|| Path::new("/"));
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "hosts".to_string());
        let template = dir.join(format!(".{name}_XXXXXX"));
        format!(
            concat!(
                "tmp=\"$(mktemp '{}')\" && cat > \"$tmp\" && ",
                "chown root:root \"$tmp\" && chmod 0644 \"$tmp\" && ",
                "mv -f \"$tmp\" '{}'",
            ),
            shell_quote(&template.to_string_lossy()),
            shell_quote(&path.to_string_lossy()),
        )
    }

    fn write_privileged(&self, content: &str) -> Result<()> {
        let failed = |reason: String| Error::WriteFailed {
            path: self.file.path().to_path_buf(),
            reason,
        };

        let mut child = Command::new(PKEXEC)
            .args(["/bin/sh", "-c", &self.script()])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    failed("pkexec not found; install polkit or run as root".to_string())
                }
                _ => failed(format!("cannot start pkexec: {e}")),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(content.as_bytes())
                .map_err(|e| failed(format!("pipe to pkexec: {e}")))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| failed(format!("wait for pkexec: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(if stderr.is_empty() {
                failed(format!("pkexec exited with {}", output.status))
            } else {
                failed(format!("pkexec exited with {}: {stderr}", output.status))
            });
        }
        info!(path = %self.file.path().display(), "replaced hosts file via pkexec");
        Ok(())
    }
}

impl HostsStorage for PkexecHostsStorage {
    fn path(&self) -> &Path {
        self.file.path()
    }

    fn read(&self) -> Result<String> {
        self.file.read()
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        match self.file.try_write(content) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                warn!(path = %self.file.path().display(), "permission denied, retrying via pkexec");
                self.write_privileged(content)
            }
            Err(e) => Err(Error::WriteFailed {
                path: self.file.path().to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Escape for use inside single quotes.
fn shell_quote(s: &str) -> String {
    s.replace('\'', r"'\''")
}
