use std::path::PathBuf;
use tracing::Level;

use crate::application::services::time_source::parse_timezone;

const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: Level,
    /// System color-scheme preference used when the theme is `auto`
    pub prefers_dark: bool,
    /// Canonical IANA name of the host zone, shown on the info panel
    pub local_timezone: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_level: Level::INFO,
            prefers_dark: true,
            local_timezone: None,
        }
    }
}

impl AppConfig {
    /// Reads `PANDA_CLOCK_DATA_DIR`, `PANDA_CLOCK_LOG`, `PANDA_CLOCK_COLOR_SCHEME` and `TZ`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup("PANDA_CLOCK_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let log_level = lookup("PANDA_CLOCK_LOG")
            .and_then(|level| level.trim().parse::<Level>().ok())
            .unwrap_or(defaults.log_level);

        let prefers_dark = match lookup("PANDA_CLOCK_COLOR_SCHEME")
            .map(|scheme| scheme.trim().to_lowercase())
            .as_deref()
        {
            Some("light") => false,
            Some("dark") => true,
            _ => defaults.prefers_dark,
        };

        // POSIX rules like "EST5EDT,M3.2.0" are not IANA names and fall back to the offset
        let local_timezone = lookup("TZ")
            .map(|zone| zone.trim().trim_start_matches(':').to_string())
            .and_then(|zone| parse_timezone(&zone).ok())
            .map(|tz| tz.name().to_string());

        Self {
            data_dir,
            log_level,
            prefers_dark,
            local_timezone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PANDA_CLOCK_DATA_DIR", "/tmp/clock"),
            ("PANDA_CLOCK_LOG", "debug"),
            ("PANDA_CLOCK_COLOR_SCHEME", "Light"),
        ]);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/clock"));
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(!config.prefers_dark);
    }

    #[test]
    fn ignores_unparsable_values() {
        let config = config_from(&[("PANDA_CLOCK_LOG", "loud"), ("PANDA_CLOCK_COLOR_SCHEME", "sepia")]);

        assert_eq!(config.log_level, Level::INFO);
        assert!(config.prefers_dark);
    }

    #[test]
    fn tz_variable_names_the_local_zone() {
        assert_eq!(
            config_from(&[("TZ", ":asia/kolkata")]).local_timezone.as_deref(),
            Some("Asia/Kolkata")
        );
        assert_eq!(config_from(&[("TZ", "EST5EDT,M3.2.0,M11.1.0")]).local_timezone, None);
    }
}
