//! On-disk settings: the config file and the location remembered between runs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};

const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.toml";

/// Settings error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no home directory to keep settings in")]
    NoSettingsDir,
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("failed to decode settings: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
}

/// What survives between runs.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_fragment: Option<String>,
}

/// Reads settings from, and writes the session to, one directory.
pub struct Settings {
    dir: PathBuf,
}

impl Settings {
    /// Uses the platform settings directory for theatredb.
    ///
    /// # Errors
    /// Returns `NoSettingsDir` if the platform has no home directory.
    pub fn locate() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::in_dir(dirs.config_dir()))
            .ok_or(ConfigError::NoSettingsDir)
    }

    /// Uses `dir`, which need not exist yet.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads `path`, or `config.toml` in the settings directory.
    ///
    /// A missing file yields defaults and nothing is written. A file that
    /// fails to decode is logged and also yields defaults.
    ///
    /// # Errors
    /// Returns error if an existing file cannot be read.
    pub fn load_config(&self, path: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path.map_or_else(|| self.dir.join(CONFIG_FILE_NAME), Path::to_path_buf);
        read_or_default(&path)
    }

    /// Location to reopen on startup, if one was remembered.
    #[must_use]
    pub fn last_fragment(&self) -> Option<String> {
        match read_or_default::<Session>(&self.dir.join(SESSION_FILE_NAME)) {
            Ok(session) => session.last_fragment.filter(|f| !f.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read session");
                None
            }
        }
    }

    /// Remembers `fragment` for the next run.
    ///
    /// # Errors
    /// Returns error if the session file cannot be written.
    pub fn remember_fragment(&self, fragment: &str) -> Result<(), ConfigError> {
        let session = Session {
            last_fragment: Some(fragment.to_string()),
        };
        fs::create_dir_all(&self.dir)?;

        // Written beside the target and renamed over it.
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(toml::to_string_pretty(&session)?.as_bytes())?;
        file.persist(self.dir.join(SESSION_FILE_NAME))
            .map_err(|e| e.error)?;

        debug!(fragment, "Session saved");
        Ok(())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(toml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring undecodable settings file");
        T::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default_and_not_written() {
        let dir = tempdir().unwrap();
        let settings = Settings::in_dir(dir.path().join("theatredb"));

        let config = settings.load_config(None).unwrap();

        assert_eq!(config.store.scan_limit, 50);
        assert!(!settings.dir().exists());
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[store]\ntable_name = \"orgs\"\n").unwrap();

        let config = Settings::in_dir(dir.path())
            .load_config(Some(&path))
            .unwrap();

        assert_eq!(config.store.table_name, "orgs");
    }

    #[test]
    fn test_undecodable_config_left_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "scan_limit = [").unwrap();

        let config = Settings::in_dir(dir.path()).load_config(None).unwrap();

        assert!(config.ui.restore_last_location);
        assert_eq!(fs::read_to_string(&path).unwrap(), "scan_limit = [");
    }

    #[test]
    fn test_fragment_remembered_across_instances() {
        let dir = tempdir().unwrap();
        let settings_dir = dir.path().join("nested").join("theatredb");

        Settings::in_dir(&settings_dir)
            .remember_fragment("p=edit-organization&id=42")
            .unwrap();

        assert_eq!(
            Settings::in_dir(&settings_dir).last_fragment().as_deref(),
            Some("p=edit-organization&id=42")
        );
    }

    #[test]
    fn test_no_session_and_corrupt_session_give_nothing() {
        let dir = tempdir().unwrap();
        let settings = Settings::in_dir(dir.path());
        assert_eq!(settings.last_fragment(), None);

        fs::write(dir.path().join(SESSION_FILE_NAME), "last_fragment = 3").unwrap();
        assert_eq!(settings.last_fragment(), None);
    }

    #[test]
    fn test_empty_fragment_not_restored() {
        let dir = tempdir().unwrap();
        let settings = Settings::in_dir(dir.path());

        settings.remember_fragment("").unwrap();

        assert_eq!(settings.last_fragment(), None);
    }
}
