//! Config save/load roundtrip and hosts file resolution.

mod common;

use lhm::config::{Config, LhmPaths};
use std::path::{Path, PathBuf};

#[test]
fn config_roundtrip() {
    let dir = common::temp_home();
    let paths = LhmPaths::for_test(dir.path());

    let config = Config {
        hosts_file: Some(PathBuf::from("/tmp/hosts.test")),
        privileged_write: false,
    };
    config.save(&paths).unwrap();
    assert!(paths.config_file.is_file());

    let loaded = Config::load(&paths).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn missing_config_uses_defaults() {
    let dir = common::temp_home();
    let paths = LhmPaths::for_test(dir.path().join("nested"));
    let loaded = Config::load(&paths).unwrap();
    assert_eq!(loaded, Config::default());
    assert!(loaded.privileged_write);
    assert!(loaded.hosts_file.is_none());
}

#[test]
fn partial_config_fills_defaults() {
    let dir = common::temp_home();
    let paths = LhmPaths::for_test(dir.path());
    std::fs::write(&paths.config_file, "hosts_file = \"/srv/hosts\"\n").unwrap();

    let loaded = Config::load(&paths).unwrap();
    assert_eq!(loaded.hosts_file, Some(PathBuf::from("/srv/hosts")));
    assert!(loaded.privileged_write);
}

#[test]
fn invalid_config_is_an_error() {
    let dir = common::temp_home();
    let paths = LhmPaths::for_test(dir.path());
    std::fs::write(&paths.config_file, "privileged_write = \"maybe\"\n").unwrap();
    assert!(Config::load(&paths).is_err());
}

#[test]
fn flag_overrides_config() {
    let config = Config {
        hosts_file: Some(PathBuf::from("/from/config")),
        privileged_write: true,
    };
    assert_eq!(
        config.hosts_file(Some(Path::new("/from/flag"))),
        PathBuf::from("/from/flag")
    );
}
