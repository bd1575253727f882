use chrono::{DateTime, Utc};
use tracing::warn;

use crate::application::services::time_source::{TimezoneError, format_display, get_time_in_zone_at};
use crate::domain::entities::clock_settings::ClockSettings;
use crate::domain::entities::time_snapshot::DisplayFormat;
use crate::domain::entities::world_clock::WorldClockCity;

pub const PLACEHOLDER_TIME: &str = "--:--";

/// One rendered world clock row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldClockReading {
    pub id: String,
    pub display_name: String,
    pub timezone: String,
    pub result: Result<DisplayFormat, TimezoneError>,
}

impl WorldClockReading {
    pub fn time_text(&self) -> &str {
        match &self.result {
            Ok(display) => &display.time,
            Err(_) => PLACEHOLDER_TIME,
        }
    }

    pub fn period(&self) -> Option<&'static str> {
        self.result.as_ref().ok().and_then(|display| display.period)
    }
}

/// Evaluate every configured entry at the same instant; a bad timezone only affects its own row
pub fn evaluate_world_clocks(settings: &ClockSettings, instant: DateTime<Utc>) -> Vec<WorldClockReading> {
    settings
        .world_clocks
        .iter()
        .map(|city| evaluate_city(city, settings, instant))
        .collect()
}

fn evaluate_city(city: &WorldClockCity, settings: &ClockSettings, instant: DateTime<Utc>) -> WorldClockReading {
    let result = get_time_in_zone_at(instant, &city.timezone)
        .map(|zoned| format_display(zoned.hours, zoned.minutes, zoned.seconds, settings.time_format, false));

    if let Err(e) = &result {
        warn!("World clock '{}' skipped: {}", city.id, e);
    }

    WorldClockReading {
        id: city.id.clone(),
        display_name: city.display_name().to_string(),
        timezone: city.timezone.clone(),
        result,
    }
}
