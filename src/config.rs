//! Configuration loading and path resolution.
//!
//! Supports LHM_HOME (config dir) and LHM_HOSTS_FILE (hosts file) env var
//! overrides for testing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::platform::SYSTEM_HOSTS_FILE;

/// Paths for lhm's own files.
#[derive(Debug, Clone)]
pub struct LhmPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl LhmPaths {
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default paths (respects LHM_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("LHM_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("org", "lhm", "lhm") {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".lhm")
        };
        Self::from_base(base)
    }
}

fn default_true() -> bool {
    true
}

/// config.toml structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Hosts file to edit; the system file when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    /// Retry permission-denied writes through pkexec (Unix only).
    #[serde(default = "default_true")]
    pub privileged_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: None,
            privileged_write: true,
        }
    }
}

impl Config {
    /// Load config from paths (with shared lock when file exists).
    pub fn load(paths: &LhmPaths) -> Result<Config> {
        if !paths.config_file.is_file() {
            return Ok(Config::default());
        }
        let mut file = fs::File::open(&paths.config_file)
            .with_context(|| format!("open {}", paths.config_file.display()))?;
        fs2::FileExt::lock_shared(&file)?;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        let cfg: Config = toml::from_str(&s)
            .with_context(|| format!("parse {}", paths.config_file.display()))?;
        Ok(cfg)
    }

    /// Save config to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &LhmPaths) -> Result<()> {
        if let Some(p) = paths.config_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.config_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        let s = toml::to_string_pretty(self)?;
        file.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Hosts file to edit: `flag`, then LHM_HOSTS_FILE, then config, then
    /// the platform default.
    pub fn hosts_file(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(p) = flag {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("LHM_HOSTS_FILE") {
            return PathBuf::from(p);
        }
        self.hosts_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SYSTEM_HOSTS_FILE))
    }
}
