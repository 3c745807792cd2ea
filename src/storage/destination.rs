//! Client-side destination file
//!
//! Created only once a SUCCESS header has arrived, so a FAIL response never
//! touches the filesystem.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, XferError};

/// A destination file being filled with payload bytes
///
/// Dropping it before `commit` removes the partial file.
pub struct Destination {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: u64,
}

impl Destination {
    /// Create `path`, failing with `DestinationExists` if it is already there
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => XferError::DestinationExists(path.to_path_buf()),
                _ => XferError::Io(e),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
            written: 0,
        })
    }

    /// Append a piece of payload
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(chunk)?;
            self.written += chunk.len() as u64;
        }
        Ok(())
    }

    /// Flush and sync; the file is kept from here on
    pub fn commit(mut self) -> Result<u64> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        self.writer = None;
        Ok(self.written)
    }
}

impl Drop for Destination {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("Failed to remove partial file {}: {}", self.path.display(), e);
            } else {
                tracing::debug!("Removed partial file {}", self.path.display());
            }
        }
    }
}
