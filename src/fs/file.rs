//! Handle to a single regular file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::FsError;

/// A handle to an existing regular file.
///
/// Holds only the path. The filesystem stays the source of truth, so a
/// handle goes stale if the file is removed between construction and use;
/// operations after that point fail with the underlying I/O error.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Opens an existing regular file.
    ///
    /// Fails with [`FsError::FileNotFound`] if nothing exists at `path`, or
    /// [`FsError::PathIsNotFile`] if the path points at a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let path = path.as_ref().to_path_buf();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(Self { path }),
            Ok(_) => Err(FsError::PathIsNotFile(path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FsError::FileNotFound(path))
            }
            Err(source) => Err(FsError::ReadFailed { path, source }),
        }
    }

    /// Returns the path this handle points at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full file contents as raw bytes.
    pub fn read(&self) -> Result<Vec<u8>, FsError> {
        fs::read(&self.path).map_err(|source| FsError::ReadFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Reads the full file contents as UTF-8 text.
    pub fn read_to_string(&self) -> Result<String, FsError> {
        let bytes = self.read()?;
        String::from_utf8(bytes).map_err(|source| FsError::InvalidUtf8 {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the file contents with `bytes`.
    pub fn write(&self, bytes: &[u8]) -> Result<(), FsError> {
        fs::write(&self.path, bytes).map_err(|source| FsError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the file contents with `text`.
    pub fn write_str(&self, text: &str) -> Result<(), FsError> {
        self.write(text.as_bytes())
    }

    /// Appends `text` to the end of the file.
    ///
    /// No locking is performed; concurrent appenders may interleave.
    pub fn append(&self, text: &str) -> Result<(), FsError> {
        let append_failed = |source| FsError::AppendFailed {
            path: self.path.clone(),
            source,
        };

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(append_failed)?;
        file.write_all(text.as_bytes()).map_err(append_failed)
    }

    /// Removes the file. Fails if it no longer exists.
    pub fn delete(self) -> Result<(), FsError> {
        fs::remove_file(&self.path).map_err(|source| FsError::DeleteFailed {
            path: self.path,
            source,
        })
    }
}
