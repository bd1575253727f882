use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::clock_settings::{Appearance, ClockSettings, SettingsUpdate};
use crate::domain::entities::world_clock::WorldClockCity;
use crate::domain::repositories::settings_repository::{RepositoryError, SettingsRepository};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist settings: {0}")]
    Persist(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// UI session flags; live only for the running process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub settings_open: bool,
    pub fullscreen: bool,
}

struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn Fn(&ClockSettings) + Send + Sync>)>,
}

/// Owner of the one authoritative settings record.
///
/// Mutations run compute -> persist -> replace -> notify under a single write
/// gate, so observers see every mutation in the order it was applied. A failed
/// persist leaves the record untouched and notifies nobody. Observers must not
/// call mutating methods from inside a notification.
pub struct SettingsStore {
    repo: Arc<dyn SettingsRepository>,
    settings: RwLock<ClockSettings>,
    session: RwLock<SessionState>,
    observers: RwLock<Observers>,
    write_gate: Mutex<()>,
}

impl SettingsStore {
    /// Build the store from persisted storage, or defaults when nothing usable is stored
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        let settings = repo.load_or_default();
        info!(
            "Settings loaded: mode {:?}, {} world clocks",
            settings.mode,
            settings.world_clocks.len()
        );

        Self {
            repo,
            settings: RwLock::new(settings),
            session: RwLock::new(SessionState::default()),
            observers: RwLock::new(Observers {
                next_id: 0,
                entries: Vec::new(),
            }),
            write_gate: Mutex::new(()),
        }
    }

    /// Copy of the current record; changes to it never reach the store
    pub fn get_settings(&self) -> ClockSettings {
        match self.settings.read() {
            Ok(settings) => settings.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update_settings(&self, update: SettingsUpdate) -> Result<()> {
        self.mutate("update", |current| current.merged(update))
    }

    /// Append to the end of the world clock list; duplicate ids are kept
    pub fn add_world_clock(&self, city: WorldClockCity) -> Result<()> {
        self.mutate("add_world_clock", move |current| {
            if current.has_world_clock(&city.id) {
                warn!("World clock id '{}' already present, keeping both", city.id);
            }
            let mut next = current.clone();
            next.world_clocks.push(city);
            next
        })
    }

    /// Remove the first entry with `id`; no-op when absent
    pub fn remove_world_clock(&self, id: &str) -> Result<()> {
        self.mutate("remove_world_clock", |current| {
            let mut next = current.clone();
            if let Some(index) = next.world_clocks.iter().position(|city| city.id == id) {
                next.world_clocks.remove(index);
            } else {
                debug!("No world clock with id '{}'", id);
            }
            next
        })
    }

    pub fn reset_settings(&self) -> Result<()> {
        self.mutate("reset", |_| ClockSettings::default())
    }

    /// Register an observer, invoked after every mutation in registration order
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&ClockSettings) + Send + Sync + 'static,
    {
        let mut observers = match self.observers.write() {
            Ok(observers) => observers,
            Err(poisoned) => poisoned.into_inner(),
        };
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = match self.observers.write() {
            Ok(observers) => observers,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = observers.entries.len();
        observers.entries.retain(|(entry_id, _)| *entry_id != id);
        observers.entries.len() != before
    }

    pub fn resolved_theme(&self, system_prefers_dark: bool) -> Appearance {
        self.get_settings().theme.resolve(system_prefers_dark)
    }

    pub fn session(&self) -> SessionState {
        self.session.read().map(|s| *s).unwrap_or_default()
    }

    /// Flip the settings panel, returning the new open state
    pub fn toggle_settings_panel(&self) -> bool {
        self.with_session(|session| {
            session.settings_open = !session.settings_open;
            session.settings_open
        })
    }

    pub fn close_settings_panel(&self) {
        self.with_session(|session| session.settings_open = false);
    }

    pub fn set_fullscreen(&self, value: bool) {
        self.with_session(|session| session.fullscreen = value);
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut session = match self.session.write() {
            Ok(session) => session,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut session)
    }

    // the gate guards no data, so a panicking observer must not wedge later writers
    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        match self.write_gate.lock() {
            Ok(gate) => gate,
            Err(poisoned) => {
                warn!("Recovering settings write gate after a panicked writer");
                poisoned.into_inner()
            }
        }
    }

    fn mutate(&self, action: &str, compute: impl FnOnce(&ClockSettings) -> ClockSettings) -> Result<()> {
        let _gate = self.lock_gate();

        let next = compute(&self.get_settings());

        if let Err(e) = self.repo.save(&next) {
            warn!("Settings {} not applied, persist failed: {}", action, e);
            return Err(StoreError::Persist(e));
        }

        {
            let mut settings = match self.settings.write() {
                Ok(settings) => settings,
                Err(poisoned) => poisoned.into_inner(),
            };
            *settings = next.clone();
        }
        debug!("Settings {} applied", action);

        // snapshot the list so observers can subscribe or unsubscribe while notified
        let observers: Vec<_> = match self.observers.read() {
            Ok(observers) => observers.entries.iter().map(|(_, o)| o.clone()).collect(),
            Err(poisoned) => poisoned.into_inner().entries.iter().map(|(_, o)| o.clone()).collect(),
        };
        for observer in observers {
            observer(&next);
        }

        Ok(())
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("repo", &self.repo)
            .field("settings", &self.get_settings())
            .finish_non_exhaustive()
    }
}
