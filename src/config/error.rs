use std::path::PathBuf;
use thiserror::Error;

use crate::fs::FsError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("filesystem error: {0}")]
    Fs(#[from] FsError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to decode configuration from '{path}': {source}")]
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}
