//! Directory-backed file store
//!
//! Serves files from a single root directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, XferError};
use crate::protocol::MAX_PAYLOAD_LEN;

/// Source of file contents for the server
///
/// Any error means the file is unavailable; the server answers FAIL.
pub trait FileStore: Send + Sync {
    /// Read the whole file named `name`
    fn load(&self, name: &str) -> Result<Vec<u8>>;
}

/// Serves files from `root`
///
/// Names are relative paths. Absolute paths, `..` components and symlinks
/// resolving outside the root are refused.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a requested name to a canonical path inside the root
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);

        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_plain {
            return Err(denied(name).into());
        }

        // Canonicalize both sides to catch symlinks pointing elsewhere
        let root = self.root.canonicalize()?;
        let path = root.join(relative).canonicalize()?;
        if !path.starts_with(&root) {
            return Err(denied(name).into());
        }

        Ok(path)
    }
}

impl FileStore for DirStore {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;

        // Refuse before reading anything dataLength cannot describe
        let len = fs::metadata(&path)?.len();
        if len > MAX_PAYLOAD_LEN {
            return Err(XferError::PayloadTooLarge(
                usize::try_from(len).unwrap_or(usize::MAX),
            ));
        }

        Ok(fs::read(path)?)
    }
}

fn denied(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{:?} is outside the served directory", name),
    )
}
