use tracing::info;

pub const DEFAULT_TIMER_SECONDS: u32 = 300;

/// Quick-pick durations offered next to the timer
pub const TIMER_PRESETS: [(&str, u32); 4] = [("1m", 60), ("5m", 300), ("10m", 600), ("25m", 1500)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDuration {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Countdown in whole seconds, advanced by a one-second `tick`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining: u32,
    total: u32,
    running: bool,
    complete: bool,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_SECONDS)
    }
}

impl CountdownTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            total: seconds,
            running: false,
            complete: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn start(&mut self) {
        if self.running || self.remaining == 0 {
            return;
        }
        self.running = true;
        self.complete = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.running = false;
        self.complete = false;
    }

    /// Replace the duration; the timer stops
    pub fn set_time(&mut self, seconds: u32) {
        *self = Self::new(seconds);
    }

    /// Shift the total duration by `delta` seconds, never below zero
    pub fn adjust(&mut self, delta: i64) {
        let adjusted = (i64::from(self.total) + delta).clamp(0, i64::from(u32::MAX));
        self.set_time(adjusted as u32);
    }

    /// Advance one second while running
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        if self.remaining <= 1 {
            self.remaining = 0;
            self.running = false;
            self.complete = true;
            info!("Timer of {}s completed", self.total);
            return Some(TimerEvent::Completed);
        }

        self.remaining -= 1;
        None
    }

    /// Elapsed share of the total, 0 to 100
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.total - self.remaining) / f64::from(self.total) * 100.0
    }

    pub fn formatted(&self) -> FormattedDuration {
        FormattedDuration {
            hours: format!("{:02}", self.remaining / 3600),
            minutes: format!("{:02}", (self.remaining % 3600) / 60),
            seconds: format!("{:02}", self.remaining % 60),
        }
    }
}
