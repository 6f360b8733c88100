//! Handle to a directory and its child files.

use std::fs;
use std::path::{Path, PathBuf};

use super::{File, FsError};

/// A handle to an existing directory.
///
/// Like [`File`], this holds nothing but the path; constructing one only
/// checks that the directory exists at that moment.
#[derive(Debug, Clone)]
pub struct Folder {
    path: PathBuf,
}

impl Folder {
    /// Opens an existing directory.
    ///
    /// Fails with [`FsError::FolderNotFound`] unless `path` is a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            Ok(Self { path })
        } else {
            Err(FsError::FolderNotFound(path))
        }
    }

    /// Opens the directory, first creating it and any missing ancestors.
    ///
    /// Idempotent: an already existing directory is opened as-is.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path).map_err(|source| FsError::CreateFolderFailed {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    /// Returns the path this handle points at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a handle to an existing file at `relative_path` below this
    /// folder.
    pub fn file(&self, relative_path: impl AsRef<Path>) -> Result<File, FsError> {
        File::open(self.path.join(relative_path))
    }

    /// Returns a handle to the file at `relative_path` below this folder,
    /// creating it empty (along with any missing intermediate directories)
    /// if it does not exist yet.
    ///
    /// Existing file contents are left untouched.
    pub fn create_file_if_needed(
        &self,
        relative_path: impl AsRef<Path>,
    ) -> Result<File, FsError> {
        let path = self.path.join(relative_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| FsError::CreateFolderFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Open without truncating so an existing file survives unchanged.
        fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| FsError::CreateFileFailed {
                path: path.clone(),
                source,
            })?;

        File::open(path)
    }

    /// Removes the directory and everything inside it.
    pub fn delete(self) -> Result<(), FsError> {
        fs::remove_dir_all(&self.path).map_err(|source| FsError::DeleteFailed {
            path: self.path,
            source,
        })
    }
}
