use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::entities::clock_settings::ClockSettings;
use crate::domain::repositories::settings_repository::{Result, SettingsRepository};

pub const SETTINGS_KEY: &str = "panda-clock-settings";

pub struct JsonSettingsRepository {
    file_path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Repository storing the settings blob under its fixed key inside `data_dir`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(format!("{SETTINGS_KEY}.json")))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl SettingsRepository for JsonSettingsRepository {
    fn load(&self) -> Result<Option<ClockSettings>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)?;
        let settings: ClockSettings = serde_json::from_str(&content)?;
        Ok(Some(settings))
    }

    fn save(&self, settings: &ClockSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;

        // create dir if it doesn't exist
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.file_path, json)?;
        debug!("Settings written to {:?}", self.file_path);
        Ok(())
    }
}

impl std::fmt::Debug for JsonSettingsRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSettingsRepository")
            .field("file_path", &self.file_path)
            .finish()
    }
}
