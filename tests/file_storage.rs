//! File-backed storage: atomic replace, permissions, error kinds.

mod common;

use lhm::platform::{FileHostsStorage, HostsStorage};
use lhm::{Engine, ErrorKind};
use std::fs;

#[test]
fn write_replaces_content_without_leftovers() {
    let dir = common::temp_home();
    let path = dir.path().join("hosts");
    fs::write(&path, "old\n").unwrap();

    let storage = FileHostsStorage::new(&path);
    storage.write_atomic("new content\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new content\n");
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("hosts")]);
}

#[cfg(unix)]
#[test]
fn write_keeps_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = common::temp_home();
    let path = dir.path().join("hosts");
    fs::write(&path, "old\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    FileHostsStorage::new(&path).write_atomic("new\n").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[test]
fn read_missing_file_fails() {
    let dir = common::temp_home();
    let storage = FileHostsStorage::new(dir.path().join("absent"));
    assert_eq!(storage.read().unwrap_err().kind(), ErrorKind::ReadFailed);
}

#[test]
fn write_into_missing_dir_fails() {
    let dir = common::temp_home();
    let storage = FileHostsStorage::new(dir.path().join("no/such/dir/hosts"));
    let err = storage.write_atomic("x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WriteFailed);
    assert!(err.to_string().contains("hosts"));
}

#[test]
fn engine_round_trip_on_disk() {
    let dir = common::temp_home();
    let path = dir.path().join("hosts");
    fs::write(&path, common::SAMPLE).unwrap();

    let mut engine = Engine::new(Box::new(FileHostsStorage::new(&path)));
    engine.load().unwrap();
    engine.set_hostnames(1, "host2").unwrap();
    engine.apply().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, common::SAMPLE.replace("host2 alias2", "host2"));
}
