use serde::{Deserialize, Serialize};

use super::world_clock::WorldClockCity;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    #[default]
    Digital,
    Analog,
    Minimal,
    Neon,
    Flip,
    Hybrid,
}

impl ClockMode {
    pub const ALL: [ClockMode; 6] = [
        ClockMode::Digital,
        ClockMode::Analog,
        ClockMode::Minimal,
        ClockMode::Neon,
        ClockMode::Flip,
        ClockMode::Hybrid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClockMode::Digital => "Digital",
            ClockMode::Analog => "Analog",
            ClockMode::Minimal => "Minimal",
            ClockMode::Neon => "Neon",
            ClockMode::Flip => "Flip",
            ClockMode::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Auto,
}

/// Concrete appearance once `Theme::Auto` has been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Theme {
    /// Next theme in the light -> dark -> auto cycle
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
            Theme::Auto => Theme::Light,
        }
    }

    pub fn resolve(self, system_prefers_dark: bool) -> Appearance {
        match self {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
            Theme::Auto if system_prefers_dark => Appearance::Dark,
            Theme::Auto => Appearance::Light,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClockSettings {
    // display
    pub mode: ClockMode,
    pub time_format: TimeFormat,
    pub show_seconds: bool,
    pub smooth_seconds: bool,
    pub show_date: bool,
    pub show_week_number: bool,

    // theme
    pub theme: Theme,
    pub accent_color: String,
    pub show_particles: bool,

    pub world_clocks: Vec<WorldClockCity>,

    // widgets
    pub show_world_clock: bool,
    pub show_timer: bool,
    pub show_stopwatch: bool,
    pub show_pomodoro: bool,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            mode: ClockMode::Digital,
            time_format: TimeFormat::TwelveHour,
            show_seconds: true,
            smooth_seconds: true,
            show_date: true,
            show_week_number: false,
            theme: Theme::Dark,
            accent_color: "green".to_string(),
            show_particles: true,
            world_clocks: vec![
                WorldClockCity::new("1", "New York", "America/New_York"),
                WorldClockCity::new("2", "London", "Europe/London"),
                WorldClockCity::new("3", "Tokyo", "Asia/Tokyo"),
                WorldClockCity::new("4", "Sydney", "Australia/Sydney"),
            ],
            show_world_clock: true,
            show_timer: true,
            show_stopwatch: true,
            show_pomodoro: true,
        }
    }
}

impl ClockSettings {
    /// Shallow merge: every field present in `update` replaces the current value
    pub fn merged(&self, update: SettingsUpdate) -> Self {
        let mut next = self.clone();

        if let Some(mode) = update.mode {
            next.mode = mode;
        }
        if let Some(time_format) = update.time_format {
            next.time_format = time_format;
        }
        if let Some(show_seconds) = update.show_seconds {
            next.show_seconds = show_seconds;
        }
        if let Some(smooth_seconds) = update.smooth_seconds {
            next.smooth_seconds = smooth_seconds;
        }
        if let Some(show_date) = update.show_date {
            next.show_date = show_date;
        }
        if let Some(show_week_number) = update.show_week_number {
            next.show_week_number = show_week_number;
        }
        if let Some(theme) = update.theme {
            next.theme = theme;
        }
        if let Some(accent_color) = update.accent_color {
            next.accent_color = accent_color;
        }
        if let Some(show_particles) = update.show_particles {
            next.show_particles = show_particles;
        }
        if let Some(world_clocks) = update.world_clocks {
            next.world_clocks = world_clocks;
        }
        if let Some(show_world_clock) = update.show_world_clock {
            next.show_world_clock = show_world_clock;
        }
        if let Some(show_timer) = update.show_timer {
            next.show_timer = show_timer;
        }
        if let Some(show_stopwatch) = update.show_stopwatch {
            next.show_stopwatch = show_stopwatch;
        }
        if let Some(show_pomodoro) = update.show_pomodoro {
            next.show_pomodoro = show_pomodoro;
        }

        next
    }

    pub fn has_world_clock(&self, id: &str) -> bool {
        self.world_clocks.iter().any(|city| city.id == id)
    }
}

/// Partial settings record; `None` leaves the current value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub mode: Option<ClockMode>,
    pub time_format: Option<TimeFormat>,
    pub show_seconds: Option<bool>,
    pub smooth_seconds: Option<bool>,
    pub show_date: Option<bool>,
    pub show_week_number: Option<bool>,
    pub theme: Option<Theme>,
    pub accent_color: Option<String>,
    pub show_particles: Option<bool>,
    pub world_clocks: Option<Vec<WorldClockCity>>,
    pub show_world_clock: Option<bool>,
    pub show_timer: Option<bool>,
    pub show_stopwatch: Option<bool>,
    pub show_pomodoro: Option<bool>,
}

impl SettingsUpdate {
    pub fn mode(mode: ClockMode) -> Self {
        Self {
            mode: Some(mode),
            ..Default::default()
        }
    }

    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Default::default()
        }
    }
}
