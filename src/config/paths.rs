//! Pure path derivation for the configuration store. No I/O happens here.

use std::path::{Path, PathBuf};

/// Directory under the user's home that holds every project's config folder.
const CONFIG_LIST_DIR: &str = ".config/NnConfigList";

/// The root folder containing one subfolder per project.
pub fn config_list_root(home: &Path) -> PathBuf {
    home.join(CONFIG_LIST_DIR)
}

/// The default config folder for a project:
/// `<home>/.config/NnConfigList/<project_name>`.
pub fn default_project_folder(home: &Path, project_name: &str) -> PathBuf {
    config_list_root(home).join(project_name)
}

/// Ensures a file name carries the `.json` extension exactly once.
///
/// Idempotent, and an empty name stays empty.
pub fn with_json_extension(name: &str) -> String {
    if name.is_empty() || name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    }
}
