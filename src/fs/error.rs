use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FsError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("path is not a regular file: {0}")]
    PathIsNotFile(PathBuf),

    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to append to '{path}': {source}")]
    AppendFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create file '{path}': {source}")]
    CreateFileFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create folder '{path}': {source}")]
    CreateFolderFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to delete '{path}': {source}")]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file '{path}' is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("home directory could not be determined")]
    HomeDirUnavailable,
}
