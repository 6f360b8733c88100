//! Process-wide well-known directories.

use std::env;
use std::path::{Path, PathBuf};

use super::FsError;

/// The user's home directory and the system temporary directory, resolved
/// once and passed explicitly to whatever needs them.
///
/// Resolving these up front instead of reaching into the environment at
/// call sites keeps everything downstream runnable against a throwaway
/// home in tests.
#[derive(Debug, Clone)]
pub struct WellKnownDirs {
    home: PathBuf,
    temp: PathBuf,
}

impl WellKnownDirs {
    /// Resolves both directories from the host environment.
    ///
    /// Fails with [`FsError::HomeDirUnavailable`] when the platform reports
    /// no home directory for the current user.
    pub fn from_env() -> Result<Self, FsError> {
        let home = dirs::home_dir().ok_or(FsError::HomeDirUnavailable)?;
        Ok(Self {
            home,
            temp: env::temp_dir(),
        })
    }

    /// Builds the pair from explicit paths.
    pub fn new(home: impl Into<PathBuf>, temp: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            temp: temp.into(),
        }
    }

    /// The user's home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The system temporary-files directory.
    pub fn temp(&self) -> &Path {
        &self.temp
    }
}
