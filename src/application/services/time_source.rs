use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::domain::entities::clock_settings::TimeFormat;
use crate::domain::entities::time_snapshot::{DisplayFormat, TimeSnapshot, ZonedTime};
use crate::domain::value_objects::calendar_names::{MonthName, WeekdayName, month_from_number};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, TimezoneError>;

/// Source of "now"; swapped for a fixed clock in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at an instant until advanced explicitly
#[derive(Debug)]
pub struct FixedClock {
    current: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut current) = self.current.write() {
            *current += by;
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        if let Ok(mut current) = self.current.write() {
            *current = instant;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.read().map(|current| *current).unwrap_or_else(|_| Utc::now())
    }
}

/// How often a consumer re-reads the time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshCadence {
    /// Every display frame, milliseconds drive sub-second motion
    Smooth,
    /// Once per second, aligned to when polling started
    Stepped,
}

impl RefreshCadence {
    pub fn from_smooth_seconds(smooth_seconds: bool) -> Self {
        if smooth_seconds {
            RefreshCadence::Smooth
        } else {
            RefreshCadence::Stepped
        }
    }

    pub fn period(&self) -> std::time::Duration {
        match self {
            RefreshCadence::Smooth => std::time::Duration::from_millis(16),
            RefreshCadence::Stepped => std::time::Duration::from_millis(1000),
        }
    }
}

/// Structured reading of one instant in the instant's own timezone
pub fn get_snapshot<Z: TimeZone>(instant: &DateTime<Z>) -> TimeSnapshot {
    let date = instant.fixed_offset();
    let iso_week = date.iso_week();

    TimeSnapshot {
        hours: date.hour(),
        minutes: date.minute(),
        seconds: date.second(),
        // leap seconds report up to 1999ms
        milliseconds: date.timestamp_subsec_millis().min(999),
        day_of_week: date.weekday().to_long_en(),
        day_of_month: date.day(),
        month: month_from_number(date.month()).to_long_en(),
        year: date.year(),
        week_number: iso_week.week(),
        iso_week_year: iso_week.year(),
        date,
    }
}

pub fn format_display(
    hours: u32,
    minutes: u32,
    seconds: u32,
    format: TimeFormat,
    show_seconds: bool,
) -> DisplayFormat {
    let (display_hours, period) = match format {
        TimeFormat::TwelveHour => {
            let period = if hours >= 12 { "PM" } else { "AM" };
            let twelve = match hours % 12 {
                0 => 12,
                h => h,
            };
            (twelve, Some(period))
        }
        TimeFormat::TwentyFourHour => (hours, None),
    };

    let time = if show_seconds {
        format!("{display_hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{display_hours:02}:{minutes:02}")
    };

    DisplayFormat { time, period }
}

/// Canonical spelling wins; otherwise the name is matched ignoring case
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse::<Tz>()
        .or_else(|_| Tz::from_str_insensitive(timezone))
        .map_err(|_| TimezoneError::InvalidTimezone(timezone.to_string()))
}

/// Wall-clock reading of `instant` in the named IANA timezone
pub fn get_time_in_zone_at(instant: DateTime<Utc>, timezone: &str) -> Result<ZonedTime> {
    let tz = parse_timezone(timezone)?;
    let local = instant.with_timezone(&tz);

    Ok(ZonedTime {
        timezone: tz.name().to_string(),
        hours: local.hour(),
        minutes: local.minute(),
        seconds: local.second(),
        date: local.fixed_offset(),
    })
}

pub fn get_time_in_zone(timezone: &str) -> Result<ZonedTime> {
    get_time_in_zone_at(Utc::now(), timezone)
}

/// Polled time source bound to a clock; holds no timers of its own
#[derive(Clone)]
pub struct TimeSource {
    clock: Arc<dyn Clock>,
}

impl TimeSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Snapshot of the current instant in the host's local timezone
    pub fn snapshot(&self) -> TimeSnapshot {
        get_snapshot(&self.clock.now().with_timezone(&Local))
    }

    pub fn time_in_zone(&self, timezone: &str) -> Result<ZonedTime> {
        get_time_in_zone_at(self.clock.now(), timezone)
    }
}

impl std::fmt::Debug for TimeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(offset_hours: i32, y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
    }

    #[test]
    fn snapshot_projects_one_instant() {
        let instant = at(2, 2024, 3, 15, 14, 30, 45) + Duration::milliseconds(250);
        let snapshot = get_snapshot(&instant);

        assert_eq!(snapshot.hours, 14);
        assert_eq!(snapshot.minutes, 30);
        assert_eq!(snapshot.seconds, 45);
        assert_eq!(snapshot.milliseconds, 250);
        assert_eq!(snapshot.day_of_week, "Friday");
        assert_eq!(snapshot.day_of_month, 15);
        assert_eq!(snapshot.month, "March");
        assert_eq!(snapshot.year, 2024);
        assert_eq!(snapshot.week_number, 11);
        assert_eq!(snapshot.date, instant);
    }

    #[test]
    fn snapshot_is_deterministic() {
        let instant = at(0, 2021, 7, 4, 9, 0, 1);
        assert_eq!(get_snapshot(&instant), get_snapshot(&instant));
    }

    #[test]
    fn sunday_is_named_and_belongs_to_previous_iso_week() {
        let snapshot = get_snapshot(&at(0, 2024, 1, 7, 12, 0, 0));

        assert_eq!(snapshot.day_of_week, "Sunday");
        assert_eq!(snapshot.week_number, 1);
    }

    #[test]
    fn iso_week_rolls_into_next_year() {
        let snapshot = get_snapshot(&at(0, 2018, 12, 31, 8, 0, 0));

        assert_eq!(snapshot.week_number, 1);
        assert_eq!(snapshot.iso_week_year, 2019);
        assert_eq!(snapshot.year, 2018);
    }

    #[test]
    fn early_january_can_belong_to_week_53() {
        // 2021-01-01 is a Friday
        let snapshot = get_snapshot(&at(0, 2021, 1, 1, 8, 0, 0));

        assert_eq!(snapshot.week_number, 53);
        assert_eq!(snapshot.iso_week_year, 2020);
    }

    #[test]
    fn twelve_hour_midnight_and_noon() {
        assert_eq!(
            format_display(0, 0, 0, TimeFormat::TwelveHour, true),
            DisplayFormat { time: "12:00:00".to_string(), period: Some("AM") }
        );
        assert_eq!(
            format_display(12, 0, 0, TimeFormat::TwelveHour, true),
            DisplayFormat { time: "12:00:00".to_string(), period: Some("PM") }
        );
        assert_eq!(
            format_display(23, 59, 7, TimeFormat::TwelveHour, false),
            DisplayFormat { time: "11:59".to_string(), period: Some("PM") }
        );
        assert_eq!(format_display(9, 5, 0, TimeFormat::TwelveHour, false).time, "09:05");
    }

    #[test]
    fn twenty_four_hour_has_no_period() {
        assert_eq!(
            format_display(13, 5, 9, TimeFormat::TwentyFourHour, false),
            DisplayFormat { time: "13:05".to_string(), period: None }
        );
        assert_eq!(format_display(0, 0, 0, TimeFormat::TwentyFourHour, true).time, "00:00:00");
    }

    #[test]
    fn out_of_range_input_does_not_panic() {
        let result = format_display(99, 75, 61, TimeFormat::TwelveHour, true);
        assert!(!result.time.is_empty());
    }

    #[test]
    fn time_in_zone_applies_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

        let kolkata = get_time_in_zone_at(instant, "Asia/Kolkata").unwrap();
        assert_eq!((kolkata.hours, kolkata.minutes), (17, 30));

        // summer time in effect
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let new_york = get_time_in_zone_at(summer, "America/New_York").unwrap();
        assert_eq!(new_york.hours, 8);
    }

    #[test]
    fn invalid_zone_fails_without_affecting_next_call() {
        let err = get_time_in_zone("Not/AZone").unwrap_err();
        assert_eq!(err, TimezoneError::InvalidTimezone("Not/AZone".to_string()));

        assert!(get_time_in_zone("Europe/Paris").is_ok());
    }

    #[test]
    fn zone_names_match_ignoring_case() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let kolkata = get_time_in_zone_at(instant, "asia/kolkata").unwrap();

        assert_eq!(kolkata.timezone, "Asia/Kolkata");
        assert_eq!((kolkata.hours, kolkata.minutes), (17, 30));
    }

    #[test]
    fn time_source_follows_its_clock() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()));
        let source = TimeSource::new(clock.clone());

        clock.advance(Duration::minutes(90));

        let tokyo = source.time_in_zone("Asia/Tokyo").unwrap();
        assert_eq!((tokyo.hours, tokyo.minutes), (22, 30));
        assert_eq!(source.now(), Utc.with_ymd_and_hms(2024, 1, 15, 13, 30, 0).unwrap());
    }

    #[test]
    fn cadence_follows_smooth_seconds() {
        assert_eq!(RefreshCadence::from_smooth_seconds(true), RefreshCadence::Smooth);
        assert_eq!(RefreshCadence::from_smooth_seconds(false), RefreshCadence::Stepped);
        assert_eq!(RefreshCadence::Stepped.period(), std::time::Duration::from_secs(1));
    }
}
