use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::commands::console::{
    ConsoleCommand, PomodoroCommand, StopwatchCommand, TimerCommand, parse_command,
};
use crate::application::commands::keyboard::handle_key;
use crate::application::dashboard::{Widgets, render_frame};
use crate::application::services::pomodoro_service::Pomodoro;
use crate::application::services::refresh_scheduler::RefreshScheduler;
use crate::application::services::settings_store::SettingsStore;
use crate::application::services::stopwatch_service::Stopwatch;
use crate::application::services::time_source::{RefreshCadence, SystemClock, TimeSource};
use crate::application::services::timer_service::{CountdownTimer, TimerEvent};
use crate::domain::entities::time_snapshot::TimeSnapshot;
use crate::domain::host::{ColorSchemeSource, FullscreenControl};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::host::{LocalFullscreen, StaticColorScheme};
use crate::infrastructure::repositories::JsonSettingsRepository;
use crate::infrastructure::timezone::TimezoneManager;

/// Outcome of one console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue(Option<String>),
    Quit,
}

pub struct DashboardApp {
    store: Arc<SettingsStore>,
    local_zone: Option<String>,
    timezones: TimezoneManager,
    color_scheme: Box<dyn ColorSchemeSource>,
    fullscreen: Box<dyn FullscreenControl>,
    widgets: Widgets,
    last_second: Option<i64>,
}

impl DashboardApp {
    pub fn new(
        store: Arc<SettingsStore>,
        local_zone: Option<String>,
        color_scheme: Box<dyn ColorSchemeSource>,
        fullscreen: Box<dyn FullscreenControl>,
    ) -> Self {
        let stopwatch = Stopwatch::new(Arc::new(SystemClock));
        Self::with_stopwatch(store, local_zone, color_scheme, fullscreen, stopwatch)
    }

    fn with_stopwatch(
        store: Arc<SettingsStore>,
        local_zone: Option<String>,
        color_scheme: Box<dyn ColorSchemeSource>,
        fullscreen: Box<dyn FullscreenControl>,
        stopwatch: Stopwatch,
    ) -> Self {
        Self {
            store,
            local_zone,
            timezones: TimezoneManager::new(),
            color_scheme,
            fullscreen,
            widgets: Widgets {
                timer: CountdownTimer::default(),
                stopwatch,
                pomodoro: Pomodoro::new(),
            },
            last_second: None,
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Advance second-based widgets by every wall-clock second since the last tick
    pub fn on_tick(&mut self, snapshot: &TimeSnapshot) -> Vec<String> {
        let second = snapshot.date.timestamp();
        // a clock stepping backwards advances nothing
        let elapsed = match self.last_second {
            Some(last) => second.saturating_sub(last).max(0),
            None => 0,
        };
        self.last_second = Some(second);
        if elapsed > 1 {
            debug!("Catching up {} seconds of widget time", elapsed);
        }

        let mut events = Vec::new();
        for _ in 0..elapsed {
            if let Some(TimerEvent::Completed) = self.widgets.timer.tick() {
                events.push("Timer finished".to_string());
            }
            if let Some(event) = self.widgets.pomodoro.tick() {
                events.push(format!("Pomodoro: {:?}", event));
            }
        }
        events
    }

    pub fn render(&self, snapshot: &TimeSnapshot) -> Vec<String> {
        let settings = self.store.get_settings();
        let appearance = settings.theme.resolve(self.color_scheme.prefers_dark());
        render_frame(
            &settings,
            snapshot,
            self.local_zone.as_deref(),
            appearance,
            &self.widgets,
        )
        .lines()
    }

    pub fn apply(&mut self, command: ConsoleCommand) -> Result<CommandOutcome> {
        let message = match command {
            ConsoleCommand::Quit => return Ok(CommandOutcome::Quit),
            ConsoleCommand::Key(key) => {
                let bound = handle_key(&key, &self.store, &*self.fullscreen)?;
                (!bound).then(|| format!("Key '{key}' is not bound"))
            }
            ConsoleCommand::Timer(command) => {
                let timer = &mut self.widgets.timer;
                match command {
                    TimerCommand::Start => timer.start(),
                    TimerCommand::Pause => timer.pause(),
                    TimerCommand::Reset => timer.reset(),
                    TimerCommand::Set(seconds) => timer.set_time(seconds),
                    TimerCommand::Adjust(delta) => timer.adjust(delta),
                }
                None
            }
            ConsoleCommand::Stopwatch(command) => {
                let stopwatch = &mut self.widgets.stopwatch;
                match command {
                    StopwatchCommand::Start => stopwatch.start(),
                    StopwatchCommand::Pause => stopwatch.pause(),
                    StopwatchCommand::Reset => stopwatch.reset(),
                    StopwatchCommand::Lap => {
                        stopwatch.lap();
                    }
                }
                None
            }
            ConsoleCommand::Pomodoro(command) => {
                let pomodoro = &mut self.widgets.pomodoro;
                match command {
                    PomodoroCommand::Start => pomodoro.start(),
                    PomodoroCommand::Pause => pomodoro.pause(),
                    PomodoroCommand::Toggle => pomodoro.toggle(),
                    PomodoroCommand::Reset => pomodoro.reset(),
                    PomodoroCommand::Switch(phase) => pomodoro.switch_phase(phase),
                }
                None
            }
            ConsoleCommand::AddCity(city) => {
                if !self.timezones.validate_timezone(&city.timezone) {
                    warn!("Adding world clock with unknown timezone '{}'", city.timezone);
                }
                let id = city.id.clone();
                self.store.add_world_clock(city)?;
                Some(format!("Added world clock '{id}'"))
            }
            ConsoleCommand::RemoveCity(id) => {
                self.store.remove_world_clock(&id)?;
                None
            }
            ConsoleCommand::Search(query) => {
                let names: Vec<&str> = self
                    .timezones
                    .search_timezones(&query)
                    .iter()
                    .map(|info| info.name())
                    .collect();
                Some(if names.is_empty() {
                    format!("No timezone matches '{query}'")
                } else {
                    names.join(", ")
                })
            }
            ConsoleCommand::Update(update) => {
                self.store.update_settings(update)?;
                None
            }
            ConsoleCommand::Reset => {
                self.store.reset_settings()?;
                Some("Settings reset to defaults".to_string())
            }
        };

        Ok(CommandOutcome::Continue(message))
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (sender, receiver) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if sender.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read console input: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

pub async fn run_app(config: AppConfig) -> Result<()> {
    let repo = Arc::new(JsonSettingsRepository::in_dir(&config.data_dir));
    info!("Using settings file {:?}", repo.file_path());

    let store = Arc::new(SettingsStore::new(repo));
    let scheduler = RefreshScheduler::new(TimeSource::system());

    // the refresh loop picks the change up on its next tick
    let (cadence_tx, mut cadence_rx) = tokio::sync::watch::channel(RefreshCadence::from_smooth_seconds(
        store.get_settings().smooth_seconds,
    ));
    store.subscribe(move |settings| {
        info!("Settings changed: mode {:?}, theme {:?}", settings.mode, settings.theme);
        let _ = cadence_tx.send(RefreshCadence::from_smooth_seconds(settings.smooth_seconds));
    });

    let mut app = DashboardApp::new(
        store,
        config.local_timezone.clone(),
        Box::new(StaticColorScheme::new(config.prefers_dark)),
        Box::new(LocalFullscreen::default()),
    );

    let mut input = spawn_stdin_reader();
    let mut subscription = scheduler.subscribe(*cadence_rx.borrow());
    let mut last_rendered: Option<Vec<String>> = None;

    info!("Dashboard running, type 'quit' or press Ctrl+C to exit");

    loop {
        tokio::select! {
            snapshot = subscription.next() => {
                let Some(snapshot) = snapshot else { break };
                for event in app.on_tick(&snapshot) {
                    info!("{}", event);
                }
                // smooth cadence ticks far more often than the text changes
                let lines = app.render(&snapshot);
                if last_rendered.as_ref() != Some(&lines) {
                    info!("{}", lines.join(" | "));
                    last_rendered = Some(lines);
                }
            }
            changed = cadence_rx.changed() => {
                if changed.is_ok() {
                    let cadence = *cadence_rx.borrow_and_update();
                    if cadence != subscription.cadence() {
                        info!("Switching refresh cadence to {:?}", cadence);
                        subscription = scheduler.subscribe(cadence);
                    }
                }
            }
            line = input.recv() => {
                let Some(line) = line else {
                    info!("Console input closed");
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => match app.apply(command).context("Command failed") {
                        Ok(CommandOutcome::Quit) => break,
                        Ok(CommandOutcome::Continue(Some(message))) => info!("{}", message),
                        Ok(CommandOutcome::Continue(None)) => {}
                        Err(e) => error!("{:#}", e),
                    },
                    Err(message) => warn!("{}", message),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!("Final settings persisted: {:?}", app.store().get_settings().mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::time_source::{Clock, FixedClock, get_snapshot};
    use crate::domain::entities::clock_settings::{ClockMode, ClockSettings};
    use crate::infrastructure::repositories::MemorySettingsRepository;
    use chrono::{Duration, TimeZone, Utc};

    fn app() -> (DashboardApp, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()));
        let store = Arc::new(SettingsStore::new(Arc::new(MemorySettingsRepository::new())));
        let app = DashboardApp::with_stopwatch(
            store,
            Some("Europe/Lisbon".to_string()),
            Box::new(StaticColorScheme::new(true)),
            Box::new(LocalFullscreen::default()),
            Stopwatch::new(clock.clone()),
        );
        (app, clock)
    }

    fn run(app: &mut DashboardApp, line: &str) -> CommandOutcome {
        app.apply(parse_command(line).unwrap()).unwrap()
    }

    #[test]
    fn console_drives_the_store() {
        let (mut app, _) = app();

        run(&mut app, "4");
        assert_eq!(app.store().get_settings().mode, ClockMode::Neon);

        run(&mut app, "add p Europe/Paris");
        assert!(app.store().get_settings().has_world_clock("p"));
        run(&mut app, "remove p");
        assert!(!app.store().get_settings().has_world_clock("p"));

        run(&mut app, "reset");
        assert_eq!(app.store().get_settings(), ClockSettings::default());
        assert_eq!(run(&mut app, "quit"), CommandOutcome::Quit);
    }

    #[test]
    fn search_lists_matching_zones() {
        let (mut app, _) = app();
        match run(&mut app, "search Tokyo") {
            CommandOutcome::Continue(Some(message)) => assert!(message.contains("Asia/Tokyo")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn timer_advances_once_per_second_of_ticks() {
        let (mut app, clock) = app();
        run(&mut app, "timer set 2");
        run(&mut app, "timer start");

        let mut events = Vec::new();
        for _ in 0..3 {
            // several frames inside the same second only count once
            events.extend(app.on_tick(&get_snapshot(&clock.now())));
            events.extend(app.on_tick(&get_snapshot(&clock.now())));
            clock.advance(Duration::seconds(1));
        }

        assert_eq!(events, vec!["Timer finished".to_string()]);
    }

    #[test]
    fn render_uses_resolved_theme() {
        let (mut app, clock) = app();
        run(&mut app, r#"set {"theme":"auto"}"#);

        let lines = app.render(&get_snapshot(&clock.now()));
        assert!(lines[0].contains("Dark"));
    }

    #[test]
    fn missed_ticks_are_caught_up() {
        let (mut app, clock) = app();
        run(&mut app, "timer set 10");
        run(&mut app, "timer start");
        run(&mut app, "pomodoro start");

        app.on_tick(&get_snapshot(&clock.now()));
        clock.advance(Duration::seconds(4));
        app.on_tick(&get_snapshot(&clock.now()));

        let lines = app.render(&get_snapshot(&clock.now()));
        assert!(lines.contains(&"Timer 00:00:06".to_string()));
        assert!(lines.iter().any(|line| line.starts_with("Pomodoro Focus Time 24:56")));
    }

    #[test]
    fn frame_reads_one_instant_even_if_the_clock_moves() {
        let (mut app, clock) = app();
        run(&mut app, r#"set {"timeFormat":"24h"}"#);
        clock.set(Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 59).unwrap());
        run(&mut app, "add u UTC");

        let snapshot = get_snapshot(&clock.now());
        clock.advance(Duration::milliseconds(1005));
        let lines = app.render(&snapshot);

        assert_eq!(lines[0], "[Digital Dark] 11:59:59");
        assert!(lines.contains(&"UTC: 11:59".to_string()));
        assert!(lines.contains(&"Timezone Europe/Lisbon".to_string()));
    }
}
