pub mod config;
pub mod fs;

pub use config::{ConfigError, ConfigManager, ConfigManagerBuilder};
pub use fs::{File, Folder, FsError, WellKnownDirs};
