use std::sync::{Arc, RwLock};

use crate::domain::entities::clock_settings::ClockSettings;
use crate::domain::repositories::settings_repository::{
    RepositoryError, Result, SettingsRepository,
};

/// In-memory blob storage holding the serialized record.
/// Useful for tests; clones share the same blob.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsRepository {
    blob: Arc<RwLock<Option<String>>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(RwLock::new(Some(blob.into()))),
            fail_writes: Arc::new(RwLock::new(false)),
        }
    }

    /// Raw stored blob, as a browser would keep it under the settings key
    pub fn blob(&self) -> Option<String> {
        self.blob.read().ok()?.clone()
    }

    /// Makes every following `save` fail, simulating a full or revoked storage
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.write() {
            *flag = fail;
        }
    }
}

impl SettingsRepository for MemorySettingsRepository {
    fn load(&self) -> Result<Option<ClockSettings>> {
        let blob = self
            .blob
            .read()
            .map_err(|e| RepositoryError::Storage(format!("Lock poisoned: {e}")))?;

        match blob.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, settings: &ClockSettings) -> Result<()> {
        if self.fail_writes.read().map(|flag| *flag).unwrap_or(false) {
            return Err(RepositoryError::Storage("Storage unavailable".to_string()));
        }

        let json = serde_json::to_string(settings)?;
        let mut blob = self
            .blob
            .write()
            .map_err(|e| RepositoryError::Storage(format!("Lock poisoned: {e}")))?;
        *blob = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::clock_settings::TimeFormat;

    #[test]
    fn round_trip_through_blob() {
        let repo = MemorySettingsRepository::new();
        let mut settings = ClockSettings::default();
        settings.time_format = TimeFormat::TwentyFourHour;

        repo.save(&settings).unwrap();
        let reloaded = MemorySettingsRepository::with_blob(repo.blob().unwrap());

        assert_eq!(reloaded.load().unwrap(), Some(settings));
    }

    #[test]
    fn failing_writes_keep_previous_blob() {
        let repo = MemorySettingsRepository::new();
        repo.save(&ClockSettings::default()).unwrap();
        let before = repo.blob();

        repo.set_fail_writes(true);
        let mut changed = ClockSettings::default();
        changed.show_date = false;

        assert!(repo.save(&changed).is_err());
        assert_eq!(repo.blob(), before);
    }
}
