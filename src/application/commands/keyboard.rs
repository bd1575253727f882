use tracing::debug;

use crate::application::services::settings_store::{Result, SettingsStore};
use crate::domain::entities::clock_settings::{ClockMode, SettingsUpdate};
use crate::domain::host::FullscreenControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleSettings,
    ToggleFullscreen,
    CycleTheme,
    SelectMode(ClockMode),
    CloseSettings,
}

/// Look up the action bound to a key name; case-insensitive, `None` when unbound
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key.to_lowercase().as_str() {
        "s" => Some(KeyAction::ToggleSettings),
        "f" => Some(KeyAction::ToggleFullscreen),
        "t" => Some(KeyAction::CycleTheme),
        "1" => Some(KeyAction::SelectMode(ClockMode::Digital)),
        "2" => Some(KeyAction::SelectMode(ClockMode::Analog)),
        "3" => Some(KeyAction::SelectMode(ClockMode::Minimal)),
        "4" => Some(KeyAction::SelectMode(ClockMode::Neon)),
        "5" => Some(KeyAction::SelectMode(ClockMode::Flip)),
        "6" => Some(KeyAction::SelectMode(ClockMode::Hybrid)),
        "escape" | "esc" => Some(KeyAction::CloseSettings),
        _ => None,
    }
}

/// Apply an action to the store and host
pub fn dispatch(action: KeyAction, store: &SettingsStore, fullscreen: &dyn FullscreenControl) -> Result<()> {
    debug!("Key action {:?}", action);

    match action {
        KeyAction::ToggleSettings => {
            store.toggle_settings_panel();
        }
        KeyAction::ToggleFullscreen => {
            let next = !fullscreen.is_fullscreen();
            fullscreen.set_fullscreen(next);
            store.set_fullscreen(next);
        }
        KeyAction::CycleTheme => {
            let next = store.get_settings().theme.next();
            store.update_settings(SettingsUpdate::theme(next))?;
        }
        KeyAction::SelectMode(mode) => {
            store.update_settings(SettingsUpdate::mode(mode))?;
        }
        KeyAction::CloseSettings => {
            if store.session().settings_open {
                store.close_settings_panel();
            }
        }
    }

    Ok(())
}

/// Resolve and dispatch a key; returns whether the key was bound
pub fn handle_key(key: &str, store: &SettingsStore, fullscreen: &dyn FullscreenControl) -> Result<bool> {
    match action_for_key(key) {
        Some(action) => dispatch(action, store, fullscreen).map(|_| true),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::clock_settings::Theme;
    use crate::infrastructure::host::local_host::LocalFullscreen;
    use crate::infrastructure::repositories::memory_settings_repository::MemorySettingsRepository;
    use std::sync::Arc;

    fn store() -> SettingsStore {
        SettingsStore::new(Arc::new(MemorySettingsRepository::new()))
    }

    #[test]
    fn digits_select_modes() {
        let store = store();
        let fullscreen = LocalFullscreen::default();

        for (key, mode) in ["1", "2", "3", "4", "5", "6"].iter().zip(ClockMode::ALL) {
            assert!(handle_key(key, &store, &fullscreen).unwrap());
            assert_eq!(store.get_settings().mode, mode);
        }
    }

    #[test]
    fn theme_key_cycles_through_all_themes() {
        let store = store();
        let fullscreen = LocalFullscreen::default();

        handle_key("t", &store, &fullscreen).unwrap();
        assert_eq!(store.get_settings().theme, Theme::Auto);
        handle_key("T", &store, &fullscreen).unwrap();
        assert_eq!(store.get_settings().theme, Theme::Light);
        handle_key("t", &store, &fullscreen).unwrap();
        assert_eq!(store.get_settings().theme, Theme::Dark);
    }

    #[test]
    fn settings_panel_and_fullscreen_toggles() {
        let store = store();
        let fullscreen = LocalFullscreen::default();

        handle_key("s", &store, &fullscreen).unwrap();
        assert!(store.session().settings_open);
        handle_key("Escape", &store, &fullscreen).unwrap();
        assert!(!store.session().settings_open);
        handle_key("Escape", &store, &fullscreen).unwrap();
        assert!(!store.session().settings_open);

        handle_key("f", &store, &fullscreen).unwrap();
        assert!(fullscreen.is_fullscreen());
        assert!(store.session().fullscreen);
        handle_key("F", &store, &fullscreen).unwrap();
        assert!(!fullscreen.is_fullscreen());
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let store = store();
        let fullscreen = LocalFullscreen::default();

        assert!(!handle_key("q", &store, &fullscreen).unwrap());
        assert!(!handle_key("7", &store, &fullscreen).unwrap());
        assert_eq!(store.get_settings(), crate::domain::ClockSettings::default());
    }
}
