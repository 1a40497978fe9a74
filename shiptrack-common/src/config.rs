//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_data_folder())
}

/// Ensure the data folder exists, creating it if necessary
pub fn ensure_data_folder(folder: &Path) -> Result<()> {
    if !folder.exists() {
        std::fs::create_dir_all(folder)?;
    }
    if !folder.is_dir() {
        return Err(Error::Config(format!(
            "Data folder path is not a directory: {}",
            folder.display()
        )));
    }
    Ok(())
}

/// Path of the flat subscription file inside the data folder
pub fn subscriptions_path(folder: &Path) -> PathBuf {
    folder.join("subscriptions.jsonl")
}

/// Path of the persisted geocode cache inside the data folder
pub fn geocode_cache_path(folder: &Path) -> PathBuf {
    folder.join("geocode-cache.json")
}

/// Locate the platform config file, if any
fn find_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("shiptrack").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/shiptrack/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("shiptrack"))
        .unwrap_or_else(|| PathBuf::from("./shiptrack_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_wins_over_everything() {
        let folder =
            resolve_data_folder(Some("/tmp/st-cli"), "SHIPTRACK_TEST_UNSET_VAR").unwrap();
        assert_eq!(folder, PathBuf::from("/tmp/st-cli"));
    }

    #[test]
    fn env_var_used_when_no_cli_arg() {
        std::env::set_var("SHIPTRACK_TEST_DATA_VAR", "/tmp/st-env");
        let folder = resolve_data_folder(None, "SHIPTRACK_TEST_DATA_VAR").unwrap();
        assert_eq!(folder, PathBuf::from("/tmp/st-env"));
        std::env::remove_var("SHIPTRACK_TEST_DATA_VAR");
    }

    #[test]
    fn file_paths_live_under_data_folder() {
        let folder = PathBuf::from("/tmp/st-data");
        assert_eq!(
            subscriptions_path(&folder),
            PathBuf::from("/tmp/st-data/subscriptions.jsonl")
        );
        assert_eq!(
            geocode_cache_path(&folder),
            PathBuf::from("/tmp/st-data/geocode-cache.json")
        );
    }

    #[test]
    fn ensure_creates_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_data_folder(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
