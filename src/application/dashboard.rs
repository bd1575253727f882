use chrono::Utc;

use crate::application::services::info_service::{DayOfYear, Greeting, MoonPhase, timezone_label};
use crate::application::services::pomodoro_service::Pomodoro;
use crate::application::services::stopwatch_service::Stopwatch;
use crate::application::services::time_source::format_display;
use crate::application::services::timer_service::CountdownTimer;
use crate::application::services::world_clock_service::evaluate_world_clocks;
use crate::domain::entities::clock_settings::{Appearance, ClockSettings};
use crate::domain::entities::time_snapshot::TimeSnapshot;

/// Widgets driven by the one-second tick
pub struct Widgets {
    pub timer: CountdownTimer,
    pub stopwatch: Stopwatch,
    pub pomodoro: Pomodoro,
}

/// Text rendering of one dashboard refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFrame {
    pub clock: String,
    pub date: Option<String>,
    pub greeting: String,
    /// Moon phase, day of year and host timezone rows
    pub info: Vec<String>,
    pub world_clocks: Vec<String>,
    pub widgets: Vec<String>,
}

impl DashboardFrame {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.clock.clone()];
        lines.extend(self.date.clone());
        lines.push(self.greeting.clone());
        lines.extend(self.info.iter().cloned());
        lines.extend(self.world_clocks.iter().cloned());
        lines.extend(self.widgets.iter().cloned());
        lines
    }
}

/// Every row is derived from the one instant carried by `snapshot`
pub fn render_frame(
    settings: &ClockSettings,
    snapshot: &TimeSnapshot,
    local_zone: Option<&str>,
    appearance: Appearance,
    widgets: &Widgets,
) -> DashboardFrame {
    let instant = snapshot.date.with_timezone(&Utc);

    let display = format_display(
        snapshot.hours,
        snapshot.minutes,
        snapshot.seconds,
        settings.time_format,
        settings.show_seconds,
    );
    let clock = match display.period {
        Some(period) => format!("[{} {:?}] {} {}", settings.mode.label(), appearance, display.time, period),
        None => format!("[{} {:?}] {}", settings.mode.label(), appearance, display.time),
    };

    let date = settings.show_date.then(|| {
        let mut date = format!(
            "{}, {} {} {}",
            snapshot.day_of_week, snapshot.month, snapshot.day_of_month, snapshot.year
        );
        if settings.show_week_number {
            date.push_str(&format!(" (week {})", snapshot.week_number));
        }
        date
    });

    let greeting = Greeting::for_hour(snapshot.hours);
    let greeting = format!("{} {}", greeting.text(), greeting.emoji());

    let today = snapshot.date.date_naive();
    let moon = MoonPhase::for_date(today);
    let day = DayOfYear::for_date(today);
    let info = vec![
        format!("Moon Phase {} {}", moon.emoji(), moon.label()),
        format!("Day of Year {} / {}", day.day, day.days_in_year),
        format!("Timezone {}", timezone_label(local_zone, *snapshot.date.offset())),
    ];

    let world_clocks = if settings.show_world_clock {
        evaluate_world_clocks(settings, instant)
            .into_iter()
            .map(|reading| match reading.period() {
                Some(period) => format!("{}: {} {}", reading.display_name, reading.time_text(), period),
                None => format!("{}: {}", reading.display_name, reading.time_text()),
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut widget_lines = Vec::new();
    if settings.show_timer {
        let t = widgets.timer.formatted();
        widget_lines.push(format!(
            "Timer {}:{}:{}{}",
            t.hours,
            t.minutes,
            t.seconds,
            if widgets.timer.is_complete() { " done" } else { "" }
        ));
    }
    if settings.show_stopwatch {
        let s = widgets.stopwatch.formatted();
        widget_lines.push(format!(
            "Stopwatch {}:{}.{} ({} laps)",
            s.minutes,
            s.seconds,
            s.centiseconds,
            widgets.stopwatch.laps().len()
        ));
    }
    if settings.show_pomodoro {
        widget_lines.push(format!(
            "Pomodoro {} {} [{}/4]",
            widgets.pomodoro.phase().label(),
            widgets.pomodoro.formatted(),
            widgets.pomodoro.cycle_position()
        ));
    }

    DashboardFrame {
        clock,
        date,
        greeting,
        info,
        world_clocks,
        widgets: widget_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::time_source::{FixedClock, get_snapshot};
    use crate::domain::entities::clock_settings::TimeFormat;
    use crate::domain::entities::world_clock::WorldClockCity;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn widgets() -> Widgets {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        Widgets {
            timer: CountdownTimer::default(),
            stopwatch: Stopwatch::new(clock),
            pomodoro: Pomodoro::new(),
        }
    }

    #[test]
    fn renders_clock_date_and_world_clocks() {
        let instant = Utc.with_ymd_and_hms(2018, 12, 31, 15, 4, 5).unwrap();
        let mut settings = ClockSettings::default();
        settings.show_week_number = true;
        settings.world_clocks = vec![
            WorldClockCity::new("1", "Tokyo", "Asia/Tokyo"),
            WorldClockCity::new("2", "Broken", "Bad/Zone"),
        ];

        let frame = render_frame(&settings, &get_snapshot(&instant), Some("UTC"), Appearance::Dark, &widgets());

        assert_eq!(frame.clock, "[Digital Dark] 03:04:05 PM");
        assert_eq!(frame.date.as_deref(), Some("Monday, December 31 2018 (week 1)"));
        assert_eq!(frame.greeting.split(' ').take(2).collect::<Vec<_>>(), ["Good", "Afternoon"]);
        assert_eq!(frame.info[1], "Day of Year 365 / 365");
        assert_eq!(frame.info[2], "Timezone UTC");
        assert_eq!(frame.world_clocks, vec!["Tokyo: 12:04 AM", "Broken: --:--"]);
        assert_eq!(frame.widgets.len(), 3);
        assert_eq!(frame.widgets[0], "Timer 00:05:00");
    }

    #[test]
    fn hidden_sections_are_omitted() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let mut settings = ClockSettings::default();
        settings.time_format = TimeFormat::TwentyFourHour;
        settings.show_seconds = false;
        settings.show_date = false;
        settings.show_world_clock = false;
        settings.show_timer = false;
        settings.show_stopwatch = false;
        settings.show_pomodoro = false;

        let frame = render_frame(&settings, &get_snapshot(&instant), None, Appearance::Light, &widgets());

        assert_eq!(frame.clock, "[Digital Light] 09:30");
        assert!(frame.date.is_none());
        assert!(frame.world_clocks.is_empty());
        assert!(frame.widgets.is_empty());
        assert_eq!(frame.lines().len(), 5);
    }

    #[test]
    fn info_rows_follow_the_snapshot_date() {
        let offset = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let mut settings = ClockSettings::default();
        settings.world_clocks = vec![WorldClockCity::new("1", "Tokyo", "Asia/Tokyo")];
        settings.time_format = TimeFormat::TwentyFourHour;

        let frame = render_frame(&settings, &get_snapshot(&local), None, Appearance::Dark, &widgets());

        assert_eq!(frame.info[1], "Day of Year 366 / 366");
        assert_eq!(frame.info[2], "Timezone UTC+09:00");
        // the world clock reads the same instant as the main clock
        assert_eq!(frame.clock, "[Digital Dark] 23:59:59");
        assert_eq!(frame.world_clocks, vec!["Tokyo: 23:59"]);
    }
}
