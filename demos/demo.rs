use confkit::{ConfigManager, WellKnownDirs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct DemoConfig {
    first_setting: i64,
    second_setting: String,
}

fn main() -> Result<(), confkit::ConfigError> {
    // Resolve well-known directories once, up front
    let dirs = WellKnownDirs::from_env()?;
    let manager: ConfigManager<DemoConfig> = ConfigManager::builder("Demo").build(&dirs);

    manager.save_config(&DemoConfig {
        first_setting: 1,
        second_setting: "x".into(),
    })?;

    let loaded = manager.load_config()?;
    println!(
        "Loaded config from {}: {loaded:?}",
        manager.config_folder().join(manager.config_file_name()).display()
    );

    // Sidecar files live in the same project folder
    manager.append_to_nested_file_if_missing("export DEMO=1", "shell/env.sh", true)?;
    manager.append_to_nested_file_if_missing("export DEMO=1", "shell/env.sh", true)?;
    manager.remove_line_from_nested_file("export DEMO=1", "shell/env.sh")?;
    manager.delete_nested_file("shell/env.sh")?;

    Ok(())
}
