// Configuration for the data files and display.
//
// Settings are resolved in three layers, later ones winning:
// 1. Built-in defaults (`users.txt`, `users_readable.txt`, `exercise_log.txt`, 20 ms typing delay)
// 2. An optional `fitness.json` in the data directory:
//   { "usersFile": "users.txt", "readableFile": "users_readable.txt",
//     "exerciseLogFile": "exercise_log.txt", "typingDelayMs": 20 }
// 3. Environment variables `FITNESS_DATA_DIR` and `FITNESS_TYPING_DELAY_MS`

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "fitness.json";
pub const DATA_DIR_ENV: &str = "FITNESS_DATA_DIR";
pub const TYPING_DELAY_ENV: &str = "FITNESS_TYPING_DELAY_MS";

const DEFAULT_TYPING_DELAY_MS: u64 = 20;

/// Raw `fitness.json` contents. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    users_file: Option<String>,
    #[serde(default)]
    readable_file: Option<String>,
    #[serde(default)]
    exercise_log_file: Option<String>,
    #[serde(default)]
    typing_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub users_file: PathBuf,
    pub readable_file: PathBuf,
    pub exercise_log_file: PathBuf,
    pub typing_delay: Duration,
}

impl Config {
    /// Defaults rooted at `data_dir`, ignoring settings files and environment.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            users_file: data_dir.join("users.txt"),
            readable_file: data_dir.join("users_readable.txt"),
            exercise_log_file: data_dir.join("exercise_log.txt"),
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            data_dir,
        }
    }

    /// Build the configuration from `FITNESS_DATA_DIR` (default: the current
    /// directory), the optional settings file and `FITNESS_TYPING_DELAY_MS`.
    pub fn from_env() -> Result<Self> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(raw) if !raw.trim().is_empty() => expand_home(raw.trim()),
            _ => PathBuf::from("."),
        };
        let mut config = Self::load(&data_dir)?;

        if let Ok(raw) = std::env::var(TYPING_DELAY_ENV) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TYPING_DELAY_ENV} must be a whole number of milliseconds, got {raw:?}"))?;
            config.typing_delay = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Load defaults for `data_dir` and apply `fitness.json` if it exists.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::with_data_dir(data_dir);
        let settings_path = data_dir.join(SETTINGS_FILE);
        if !settings_path.exists() {
            return Ok(config);
        }

        let content = std::fs::read_to_string(&settings_path)
            .with_context(|| format!("Failed to read {}", settings_path.display()))?;
        let settings: SettingsFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", settings_path.display()))?;

        if let Some(name) = settings.users_file {
            config.users_file = data_dir.join(name);
        }
        if let Some(name) = settings.readable_file {
            config.readable_file = data_dir.join(name);
        }
        if let Some(name) = settings.exercise_log_file {
            config.exercise_log_file = data_dir.join(name);
        }
        if let Some(millis) = settings.typing_delay_ms {
            config.typing_delay = Duration::from_millis(millis);
        }
        Ok(config)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix('~') {
        Some(rest) => {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::with_data_dir(dir.path()));
        assert_eq!(config.users_file, dir.path().join("users.txt"));
        assert_eq!(config.typing_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "usersFile": "members.txt", "typingDelayMs": 0 }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.users_file, dir.path().join("members.txt"));
        assert_eq!(config.readable_file, dir.path().join("users_readable.txt"));
        assert_eq!(config.typing_delay, Duration::ZERO);
    }

    #[test]
    fn test_broken_settings_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/data"), PathBuf::from("/var/data"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/fitness"), home.join("fitness"));
        }
    }
}
