use std::fmt::Debug;
use thiserror::Error;

use crate::domain::entities::clock_settings::ClockSettings;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Keyed blob holding the persisted settings record
pub trait SettingsRepository: Send + Sync + Debug {
    /// Load the persisted record; `Ok(None)` when nothing was ever saved
    fn load(&self) -> Result<Option<ClockSettings>>;

    /// Overwrite the persisted record; must be durable once this returns
    fn save(&self, settings: &ClockSettings) -> Result<()>;

    /// Load, falling back to defaults when the blob is absent or unreadable
    fn load_or_default(&self) -> ClockSettings {
        match self.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => ClockSettings::default(),
            Err(e) => {
                tracing::warn!("Discarding unreadable settings, using defaults: {}", e);
                ClockSettings::default()
            }
        }
    }
}
