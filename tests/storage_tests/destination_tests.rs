//! Destination tests

use std::fs;

use filexfer::storage::Destination;
use filexfer::XferError;
use tempfile::TempDir;

#[test]
fn test_commit_keeps_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.bin");

    let mut dest = Destination::create(&path).unwrap();
    dest.write_chunk(b"hel").unwrap();
    dest.write_chunk(b"lo").unwrap();

    assert_eq!(dest.commit().unwrap(), 5);
    assert_eq!(fs::read(&path).unwrap(), b"hello");
}

#[test]
fn test_drop_without_commit_removes_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.bin");

    {
        let mut dest = Destination::create(&path).unwrap();
        dest.write_chunk(b"partial").unwrap();
        assert!(path.exists());
    }

    assert!(!path.exists());
}

#[test]
fn test_create_refuses_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.bin");
    fs::write(&path, b"old").unwrap();

    match Destination::create(&path) {
        Err(XferError::DestinationExists(p)) => assert_eq!(p, path),
        Err(e) => panic!("Expected DestinationExists, got {:?}", e),
        Ok(_) => panic!("Expected DestinationExists"),
    }
    assert_eq!(fs::read(&path).unwrap(), b"old");
}

#[test]
fn test_create_in_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no").join("such").join("dir.bin");

    assert!(matches!(Destination::create(&path), Err(XferError::Io(_))));
}
