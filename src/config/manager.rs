use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::paths;
use super::ConfigError;
use crate::fs::{Folder, WellKnownDirs};

/// Manages one project's configuration folder: a pretty-printed JSON config
/// file plus any nested sidecar files kept alongside it.
///
/// Generic over the configuration type `C`, which only needs to round-trip
/// through serde. The manager holds nothing but the resolved paths; every
/// operation is a one-shot transaction against the filesystem, with no
/// caching and no locking. Overlapping managers for the same project can
/// race; last writer wins.
///
/// ## Example
///
/// ```no_run
/// use confkit::{ConfigManager, WellKnownDirs};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct AppSettings {
///     first_setting: i64,
///     second_setting: String,
/// }
///
/// let dirs = WellKnownDirs::from_env()?;
/// let manager: ConfigManager<AppSettings> = ConfigManager::builder("Demo").build(&dirs);
///
/// manager.save_config(&AppSettings {
///     first_setting: 1,
///     second_setting: "x".into(),
/// })?;
/// let settings = manager.load_config()?;
/// # Ok::<(), confkit::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigManager<C> {
    project_name: String,
    config_folder: PathBuf,
    config_file_name: String,
    _config: PhantomData<fn() -> C>,
}

impl<C> ConfigManager<C> {
    /// Creates a builder for the given project.
    ///
    /// Folder and file name default to derivations from the project name
    /// unless overridden on the builder.
    pub fn builder(project_name: impl Into<String>) -> ConfigManagerBuilder<C> {
        ConfigManagerBuilder {
            project_name: project_name.into(),
            config_folder: None,
            config_file_name: None,
            _config: PhantomData,
        }
    }

    /// The project this manager is bound to.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The folder holding the config file and all nested files.
    pub fn config_folder(&self) -> &Path {
        &self.config_folder
    }

    /// The normalized config file name, always ending in `.json`.
    pub fn config_file_name(&self) -> &str {
        &self.config_file_name
    }
}

impl<C: DeserializeOwned> ConfigManager<C> {
    /// Loads the project's configuration from disk.
    ///
    /// Fails with a filesystem error if the project has never been saved,
    /// or [`ConfigError::Deserialize`] if the stored JSON no longer matches
    /// `C`. Decoding is all-or-nothing; there are no partial or merge
    /// semantics.
    pub fn load_config(&self) -> Result<C, ConfigError> {
        let folder = Folder::open(&self.config_folder)?;
        let file = folder.file(&self.config_file_name)?;
        let bytes = file.read()?;
        let config =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Deserialize {
                path: file.path().to_path_buf(),
                source,
            })?;

        log::debug!(
            "loaded config for project '{}' from {}",
            self.project_name,
            file.path().display()
        );
        Ok(config)
    }
}

impl<C: Serialize> ConfigManager<C> {
    /// Saves the configuration as pretty-printed JSON, fully replacing any
    /// previous contents. The config folder and file are created on demand.
    pub fn save_config(&self, config: &C) -> Result<(), ConfigError> {
        let folder = Folder::create(&self.config_folder)?;
        let file = folder.create_file_if_needed(&self.config_file_name)?;
        let json = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        file.write_str(&json)?;

        log::debug!(
            "saved config for project '{}' to {}",
            self.project_name,
            file.path().display()
        );
        Ok(())
    }
}

impl<C> ConfigManager<C> {
    /// Writes `contents` to a file below the project folder, creating the
    /// file and any missing intermediate directories first.
    pub fn save_nested_file(
        &self,
        contents: &str,
        relative_path: impl AsRef<Path>,
    ) -> Result<(), ConfigError> {
        let folder = Folder::create(&self.config_folder)?;
        let file = folder.create_file_if_needed(relative_path)?;
        file.write_str(contents)?;

        log::debug!("saved nested file {}", file.path().display());
        Ok(())
    }

    /// Deletes a nested file.
    ///
    /// Succeeds silently when the project folder or the file does not
    /// exist; absence already satisfies the caller's intent.
    pub fn delete_nested_file(&self, relative_path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let Ok(folder) = Folder::open(&self.config_folder) else {
            return Ok(());
        };
        if let Ok(file) = folder.file(relative_path) {
            let path = file.path().to_path_buf();
            file.delete()?;
            log::debug!("deleted nested file {}", path.display());
        }
        Ok(())
    }

    /// Appends `text` to a nested file unless the file already contains it
    /// anywhere in its current contents (a substring check, not a
    /// line-exact one). The file is created first if needed.
    ///
    /// With `as_new_line` set, the appended text is prefixed with `\n`.
    pub fn append_to_nested_file_if_missing(
        &self,
        text: &str,
        relative_path: impl AsRef<Path>,
        as_new_line: bool,
    ) -> Result<(), ConfigError> {
        let folder = Folder::create(&self.config_folder)?;
        let file = folder.create_file_if_needed(relative_path)?;
        let existing = file.read_to_string()?;

        if !existing.contains(text) {
            if as_new_line {
                file.append(&format!("\n{text}"))?;
            } else {
                file.append(text)?;
            }
        }
        Ok(())
    }

    /// Removes every line of a nested file whose trimmed contents equal the
    /// trimmed `text`, then rewrites the file with the remaining lines
    /// joined by `\n`.
    ///
    /// Succeeds silently when the file does not exist. All matching lines
    /// are removed, not just the first; the rewrite normalizes whatever
    /// line-ending style the file had.
    pub fn remove_line_from_nested_file(
        &self,
        text: &str,
        relative_path: impl AsRef<Path>,
    ) -> Result<(), ConfigError> {
        let Ok(folder) = Folder::open(&self.config_folder) else {
            return Ok(());
        };
        let Ok(file) = folder.file(relative_path) else {
            return Ok(());
        };

        let existing = file.read_to_string()?;
        let needle = text.trim();
        let remaining: Vec<&str> = split_lines(&existing)
            .into_iter()
            .filter(|line| line.trim() != needle)
            .collect();
        file.write_str(&remaining.join("\n"))?;
        Ok(())
    }
}

/// Builder for a [`ConfigManager`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigManagerBuilder<C> {
    project_name: String,
    config_folder: Option<PathBuf>,
    config_file_name: Option<String>,
    _config: PhantomData<fn() -> C>,
}

impl<C> ConfigManagerBuilder<C> {
    /// Overrides the folder the project's files live in.
    pub fn config_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_folder = Some(path.into());
        self
    }

    /// Overrides the config file name. The name is normalized to end in
    /// `.json`.
    pub fn config_file_name(mut self, name: impl Into<String>) -> Self {
        self.config_file_name = Some(name.into());
        self
    }

    /// Resolves paths against the given well-known directories and builds
    /// the manager. No filesystem access happens until the first operation.
    pub fn build(self, dirs: &WellKnownDirs) -> ConfigManager<C> {
        let config_folder = self.config_folder.unwrap_or_else(|| {
            paths::default_project_folder(dirs.home(), &self.project_name)
        });
        let config_file_name = paths::with_json_extension(
            self.config_file_name.as_deref().unwrap_or(&self.project_name),
        );

        ConfigManager {
            project_name: self.project_name,
            config_folder,
            config_file_name,
            _config: PhantomData,
        }
    }
}

/// Splits text into lines, treating `\r\n`, `\n`, and bare `\r` each as a
/// single line boundary.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&text[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::default_project_folder;
    use serde::Deserialize;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SampleConfig {
        first_setting: i64,
        second_setting: String,
    }

    impl SampleConfig {
        fn new(first_setting: i64, second_setting: &str) -> Self {
            Self {
                first_setting,
                second_setting: second_setting.to_string(),
            }
        }
    }

    fn sandbox() -> (TempDir, WellKnownDirs) {
        let home = tempdir().unwrap();
        let dirs = WellKnownDirs::new(home.path(), std::env::temp_dir());
        (home, dirs)
    }

    fn manager(dirs: &WellKnownDirs) -> ConfigManager<SampleConfig> {
        ConfigManager::builder("Demo").build(dirs)
    }

    #[test]
    fn builder_derives_default_paths() {
        let (_home, dirs) = sandbox();

        let sut = manager(&dirs);

        assert_eq!(sut.project_name(), "Demo");
        assert_eq!(
            sut.config_folder(),
            default_project_folder(dirs.home(), "Demo")
        );
        assert_eq!(sut.config_file_name(), "Demo.json");
    }

    #[test]
    fn builder_honors_overrides_and_normalizes_file_name() {
        let (_home, dirs) = sandbox();

        let sut: ConfigManager<SampleConfig> = ConfigManager::builder("Demo")
            .config_folder("/elsewhere/configs")
            .config_file_name("custom")
            .build(&dirs);

        assert_eq!(sut.config_folder(), Path::new("/elsewhere/configs"));
        assert_eq!(sut.config_file_name(), "custom.json");
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        let config = SampleConfig::new(1, "x");

        sut.save_config(&config).unwrap();
        let loaded = sut.load_config().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn save_writes_pretty_json_at_default_location() {
        let (home, dirs) = sandbox();
        let sut = manager(&dirs);

        sut.save_config(&SampleConfig::new(1, "x")).unwrap();

        let expected_path = home
            .path()
            .join(".config/NnConfigList/Demo/Demo.json");
        let contents = fs::read_to_string(&expected_path).unwrap();
        assert!(contents.contains('\n'), "expected pretty-printed output");
        let parsed: SampleConfig = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, SampleConfig::new(1, "x"));
    }

    #[test]
    fn save_replaces_previous_config_entirely() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);

        sut.save_config(&SampleConfig::new(1, "old")).unwrap();
        sut.save_config(&SampleConfig::new(2, "new")).unwrap();
        let loaded = sut.load_config().unwrap();

        assert_eq!(loaded, SampleConfig::new(2, "new"));
    }

    #[test]
    fn repeated_saves_produce_identical_bytes() {
        let (home, dirs) = sandbox();
        let sut = manager(&dirs);
        let config = SampleConfig::new(7, "same");
        let path = home.path().join(".config/NnConfigList/Demo/Demo.json");

        sut.save_config(&config).unwrap();
        let first = fs::read(&path).unwrap();
        sut.save_config(&config).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn load_fails_for_never_saved_project() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);

        let result = sut.load_config();

        assert!(result.is_err());
    }

    #[test]
    fn load_fails_on_schema_drift() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("{\"unrelated\": true}", "Demo.json")
            .unwrap();

        let result = sut.load_config();

        assert!(matches!(result, Err(ConfigError::Deserialize { .. })));
    }

    #[test]
    fn nested_file_save_and_delete() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        let nested = sut.config_folder().join("Sub/File.txt");

        sut.save_nested_file("a\nb\nc", "Sub/File.txt").unwrap();
        assert_eq!(fs::read_to_string(&nested).unwrap(), "a\nb\nc");

        sut.delete_nested_file("Sub/File.txt").unwrap();
        assert!(!nested.exists());

        // Deleting again, or deleting under a never-created project, is fine.
        sut.delete_nested_file("Sub/File.txt").unwrap();
    }

    #[test]
    fn delete_nested_file_without_project_folder_is_noop() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);

        sut.delete_nested_file("never/created.txt").unwrap();
    }

    #[test]
    fn append_skips_text_already_present() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("first\nsecond\nthird", "notes.txt")
            .unwrap();

        sut.append_to_nested_file_if_missing("second", "notes.txt", true)
            .unwrap();

        let contents = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        assert_eq!(contents, "first\nsecond\nthird");
    }

    #[test]
    fn append_is_idempotent() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("first", "notes.txt").unwrap();

        sut.append_to_nested_file_if_missing("second", "notes.txt", true)
            .unwrap();
        let after_one = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        sut.append_to_nested_file_if_missing("second", "notes.txt", true)
            .unwrap();
        let after_two = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();

        assert_eq!(after_one, "first\nsecond");
        assert_eq!(after_one, after_two);
    }

    #[test]
    fn append_matches_substrings_mid_line() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("prefix-second-suffix", "notes.txt")
            .unwrap();

        sut.append_to_nested_file_if_missing("second", "notes.txt", true)
            .unwrap();

        let contents = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        assert_eq!(contents, "prefix-second-suffix");
    }

    #[test]
    fn append_creates_missing_file() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);

        sut.append_to_nested_file_if_missing("alias x=y", "shell/aliases", false)
            .unwrap();

        let contents =
            fs::read_to_string(sut.config_folder().join("shell/aliases")).unwrap();
        assert_eq!(contents, "alias x=y");
    }

    #[test]
    fn remove_drops_exact_trimmed_line() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("first\nsecond\nthird", "notes.txt")
            .unwrap();

        sut.remove_line_from_nested_file("second", "notes.txt")
            .unwrap();

        let contents = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        assert_eq!(contents, "first\nthird");
    }

    #[test]
    fn remove_drops_every_matching_line() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("keep\ndrop\nkeep\n  drop  ", "notes.txt")
            .unwrap();

        sut.remove_line_from_nested_file("drop", "notes.txt").unwrap();

        let contents = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        assert_eq!(contents, "keep\nkeep");
    }

    #[test]
    fn remove_ignores_partial_line_matches() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("first\nsecond half\nthird", "notes.txt")
            .unwrap();

        sut.remove_line_from_nested_file("second", "notes.txt")
            .unwrap();

        let contents = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        assert_eq!(contents, "first\nsecond half\nthird");
    }

    #[test]
    fn remove_normalizes_crlf_line_endings() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);
        sut.save_nested_file("first\r\nsecond\r\nthird", "notes.txt")
            .unwrap();

        sut.remove_line_from_nested_file("second", "notes.txt")
            .unwrap();

        let contents = fs::read_to_string(sut.config_folder().join("notes.txt")).unwrap();
        assert_eq!(contents, "first\nthird");
    }

    #[test]
    fn remove_on_missing_file_is_noop() {
        let (_home, dirs) = sandbox();
        let sut = manager(&dirs);

        sut.remove_line_from_nested_file("anything", "absent.txt")
            .unwrap();
    }

    #[test]
    fn managers_with_distinct_projects_do_not_collide() {
        let (_home, dirs) = sandbox();
        let demo = manager(&dirs);
        let other: ConfigManager<SampleConfig> = ConfigManager::builder("Other").build(&dirs);
        demo.save_config(&SampleConfig::new(1, "demo")).unwrap();

        let result = other.load_config();

        assert!(result.is_err());
    }

    #[test]
    fn split_lines_handles_mixed_conventions() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("tail\n"), vec!["tail", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }
}
