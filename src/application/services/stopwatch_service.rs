use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::services::time_source::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLap {
    pub minutes: String,
    pub seconds: String,
    pub centiseconds: String,
}

/// Millisecond stopwatch; elapsed time is accumulated across pauses
pub struct Stopwatch {
    clock: Arc<dyn Clock>,
    started_at: Option<DateTime<Utc>>,
    accumulated_ms: u64,
    laps: Vec<u64>,
}

impl Stopwatch {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            started_at: None,
            accumulated_ms: 0,
            laps: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed_ms(&self) -> u64 {
        let running_ms = self
            .started_at
            .map(|start| (self.clock.now() - start).num_milliseconds().max(0) as u64)
            .unwrap_or(0);
        self.accumulated_ms + running_ms
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
    }

    pub fn pause(&mut self) {
        if self.started_at.is_some() {
            self.accumulated_ms = self.elapsed_ms();
            self.started_at = None;
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated_ms = 0;
        self.laps.clear();
    }

    /// Record the current elapsed time; ignored while stopped
    pub fn lap(&mut self) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        let elapsed = self.elapsed_ms();
        self.laps.push(elapsed);
        Some(elapsed)
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    pub fn formatted(&self) -> FormattedLap {
        format_stopwatch(self.elapsed_ms())
    }
}

pub fn format_stopwatch(ms: u64) -> FormattedLap {
    let total_seconds = ms / 1000;
    FormattedLap {
        minutes: format!("{:02}", total_seconds / 60),
        seconds: format!("{:02}", total_seconds % 60),
        centiseconds: format!("{:02}", (ms % 1000) / 10),
    }
}

impl std::fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stopwatch")
            .field("running", &self.is_running())
            .field("accumulated_ms", &self.accumulated_ms)
            .field("laps", &self.laps)
            .finish()
    }
}
