//! Minimal filesystem handles backing the configuration store.

mod error;
mod file;
mod folder;
mod wellknown;

pub use error::FsError;
pub use file::File;
pub use folder::Folder;
pub use wellknown::WellKnownDirs;
