//! File-backed [`SettingsStore`]: operator settings as a TOML document.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use planthub_app::ports::SettingsStore;
use planthub_domain::error::PlantHubError;
use planthub_domain::settings::Settings;

/// Settings file failures.
#[derive(Debug, thiserror::Error)]
pub enum SettingsFileError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<SettingsFileError> for PlantHubError {
    fn from(err: SettingsFileError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Reads and writes [`Settings`] at a fixed path.
///
/// A missing file reads as the defaults. Saves go to a sibling temporary
/// file that is then renamed over the target, so readers never observe a
/// half-written document. Each save uses its own temporary file.
#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    saves: AtomicU64,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            saves: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self, save: u64) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.{save}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Settings, SettingsFileError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsFileError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| SettingsFileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, settings: &Settings) -> Result<(), SettingsFileError> {
        let content = toml::to_string_pretty(settings)?;
        let temp = self.temp_path(self.saves.fetch_add(1, Ordering::Relaxed));
        let io_err = |source| SettingsFileError::Io {
            path: self.path.clone(),
            source,
        };
        tokio::fs::write(&temp, content).await.map_err(io_err)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> impl Future<Output = Result<Settings, PlantHubError>> + Send {
        async move { Ok(self.read().await?) }
    }

    fn save(&self, settings: &Settings) -> impl Future<Output = Result<(), PlantHubError>> + Send {
        let settings = settings.clone();
        async move { Ok(self.write(&settings).await?) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planthub_domain::auto_control::AutoControlConfig;

    #[tokio::test]
    async fn should_load_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("settings.toml"));

        let settings = store.load().await.unwrap();

        assert_eq!(settings, Settings::default());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn should_round_trip_saved_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("settings.toml"));
        let settings = Settings {
            log_interval_min: 5,
            auto_control: AutoControlConfig {
                enabled: false,
                ..AutoControlConfig::default()
            },
        };

        store.save(&settings).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn should_keep_last_of_concurrent_saves_intact() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("settings.toml"));
        let first = Settings {
            log_interval_min: 5,
            ..Settings::default()
        };
        let second = Settings {
            log_interval_min: 15,
            ..Settings::default()
        };

        let (a, b) = tokio::join!(store.save(&first), store.save(&second));
        a.unwrap();
        b.unwrap();

        let loaded = store.load().await.unwrap();
        assert!(loaded == first || loaded == second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn should_fill_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "log_interval_min = 10\n").unwrap();

        let settings = TomlSettingsStore::new(&path).load().await.unwrap();

        assert_eq!(settings.log_interval_min, 10);
        assert_eq!(settings.auto_control, AutoControlConfig::default());
    }

    #[tokio::test]
    async fn should_report_malformed_file_as_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "log_interval_min = [").unwrap();

        let err = TomlSettingsStore::new(&path).load().await.unwrap_err();

        assert!(matches!(err, PlantHubError::Storage(_)));
    }

    #[tokio::test]
    async fn should_fail_to_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("nope").join("settings.toml"));

        let err = store.save(&Settings::default()).await.unwrap_err();

        assert!(matches!(err, PlantHubError::Storage(_)));
    }
}
