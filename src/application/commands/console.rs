use crate::application::services::pomodoro_service::PomodoroPhase;
use crate::domain::entities::clock_settings::SettingsUpdate;
use crate::domain::entities::world_clock::WorldClockCity;

#[derive(Debug, Clone, PartialEq)]
pub enum TimerCommand {
    Start,
    Pause,
    Reset,
    Set(u32),
    Adjust(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchCommand {
    Start,
    Pause,
    Reset,
    Lap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    Switch(PomodoroPhase),
}

/// One line typed into the dashboard console
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Key(String),
    Timer(TimerCommand),
    Stopwatch(StopwatchCommand),
    Pomodoro(PomodoroCommand),
    AddCity(WorldClockCity),
    RemoveCity(String),
    Search(String),
    Update(SettingsUpdate),
    Reset,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "" => Err("Empty command".to_string()),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        "reset" => Ok(ConsoleCommand::Reset),
        "timer" => parse_timer(rest).map(ConsoleCommand::Timer),
        "stopwatch" => parse_stopwatch(rest).map(ConsoleCommand::Stopwatch),
        "pomodoro" => parse_pomodoro(rest).map(ConsoleCommand::Pomodoro),
        "add" => parse_add(rest).map(ConsoleCommand::AddCity),
        "remove" if !rest.is_empty() => Ok(ConsoleCommand::RemoveCity(rest.to_string())),
        "remove" => Err("Usage: remove <id>".to_string()),
        "search" if !rest.is_empty() => Ok(ConsoleCommand::Search(rest.to_string())),
        "search" => Err("Usage: search <city>".to_string()),
        "set" => serde_json::from_str::<SettingsUpdate>(rest)
            .map(ConsoleCommand::Update)
            .map_err(|e| format!("Invalid settings update: {e}")),
        _ if rest.is_empty() => Ok(ConsoleCommand::Key(head.to_string())),
        _ => Err(format!("Unknown command: {head}")),
    }
}

fn parse_timer(args: &str) -> Result<TimerCommand, String> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("start"), None) => Ok(TimerCommand::Start),
        (Some("pause"), None) => Ok(TimerCommand::Pause),
        (Some("reset"), None) => Ok(TimerCommand::Reset),
        (Some("set"), Some(secs)) => secs
            .parse::<u32>()
            .map(TimerCommand::Set)
            .map_err(|_| "Invalid seconds".to_string()),
        (Some(delta), None) if delta.starts_with('+') || delta.starts_with('-') => delta
            .parse::<i64>()
            .map(TimerCommand::Adjust)
            .map_err(|_| "Invalid adjustment".to_string()),
        _ => Err("Usage: timer start|pause|reset|set <secs>|+<secs>|-<secs>".to_string()),
    }
}

fn parse_stopwatch(args: &str) -> Result<StopwatchCommand, String> {
    match args {
        "start" => Ok(StopwatchCommand::Start),
        "pause" => Ok(StopwatchCommand::Pause),
        "reset" => Ok(StopwatchCommand::Reset),
        "lap" => Ok(StopwatchCommand::Lap),
        _ => Err("Usage: stopwatch start|pause|reset|lap".to_string()),
    }
}

fn parse_pomodoro(args: &str) -> Result<PomodoroCommand, String> {
    match args {
        "start" => Ok(PomodoroCommand::Start),
        "pause" => Ok(PomodoroCommand::Pause),
        "toggle" => Ok(PomodoroCommand::Toggle),
        "reset" => Ok(PomodoroCommand::Reset),
        "work" => Ok(PomodoroCommand::Switch(PomodoroPhase::Work)),
        "short" => Ok(PomodoroCommand::Switch(PomodoroPhase::ShortBreak)),
        "long" => Ok(PomodoroCommand::Switch(PomodoroPhase::LongBreak)),
        _ => Err("Usage: pomodoro start|pause|toggle|reset|work|short|long".to_string()),
    }
}

/// `add <id> <timezone> [name...]`; the name defaults to the zone's city part
fn parse_add(args: &str) -> Result<WorldClockCity, String> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let (Some(id), Some(timezone)) = (parts.next(), parts.next()) else {
        return Err("Usage: add <id> <timezone> [name]".to_string());
    };

    let name = parts
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            timezone
                .rsplit('/')
                .next()
                .unwrap_or(timezone)
                .replace('_', " ")
        });

    Ok(WorldClockCity::new(id, name, timezone))
}
