use tracing::info;

/// Work sessions completed before a long break
pub const POMODOROS_PER_CYCLE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroPhase {
    Work,
    ShortBreak,
    LongBreak,
}

impl PomodoroPhase {
    pub fn duration_secs(&self) -> u32 {
        match self {
            PomodoroPhase::Work => 25 * 60,
            PomodoroPhase::ShortBreak => 5 * 60,
            PomodoroPhase::LongBreak => 15 * 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PomodoroPhase::Work => "Focus Time",
            PomodoroPhase::ShortBreak => "Short Break",
            PomodoroPhase::LongBreak => "Long Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroEvent {
    PhaseCompleted {
        finished: PomodoroPhase,
        next: PomodoroPhase,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    phase: PomodoroPhase,
    time_left: u32,
    running: bool,
    completed: u32,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self {
            phase: PomodoroPhase::Work,
            time_left: PomodoroPhase::Work.duration_secs(),
            running: false,
            completed: 0,
        }
    }
}

impl Pomodoro {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Position inside the current cycle, drives the progress dots
    pub fn cycle_position(&self) -> u32 {
        self.completed % POMODOROS_PER_CYCLE
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Restart the current phase from its full duration
    pub fn reset(&mut self) {
        self.time_left = self.phase.duration_secs();
        self.running = false;
    }

    pub fn switch_phase(&mut self, phase: PomodoroPhase) {
        self.phase = phase;
        self.time_left = phase.duration_secs();
        self.running = false;
    }

    pub fn tick(&mut self) -> Option<PomodoroEvent> {
        if !self.running {
            return None;
        }

        if self.time_left > 1 {
            self.time_left -= 1;
            return None;
        }

        let finished = self.phase;
        let next = match finished {
            PomodoroPhase::Work => {
                self.completed += 1;
                if self.completed % POMODOROS_PER_CYCLE == 0 {
                    PomodoroPhase::LongBreak
                } else {
                    PomodoroPhase::ShortBreak
                }
            }
            PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => PomodoroPhase::Work,
        };

        self.switch_phase(next);
        info!("{} finished, next: {}", finished.label(), next.label());
        Some(PomodoroEvent::PhaseCompleted { finished, next })
    }

    pub fn progress(&self) -> f64 {
        let total = self.phase.duration_secs();
        f64::from(total - self.time_left) / f64::from(total) * 100.0
    }

    /// `MM:SS`
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish_phase(pomodoro: &mut Pomodoro) -> Option<PomodoroEvent> {
        pomodoro.start();
        let mut last = None;
        for _ in 0..pomodoro.phase().duration_secs() {
            last = pomodoro.tick();
        }
        last
    }

    #[test]
    fn work_leads_to_short_break_then_back_to_work() {
        let mut pomodoro = Pomodoro::new();

        assert_eq!(
            finish_phase(&mut pomodoro),
            Some(PomodoroEvent::PhaseCompleted {
                finished: PomodoroPhase::Work,
                next: PomodoroPhase::ShortBreak,
            })
        );
        assert_eq!(pomodoro.completed(), 1);
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.time_left(), 5 * 60);

        finish_phase(&mut pomodoro);
        assert_eq!(pomodoro.phase(), PomodoroPhase::Work);
        assert_eq!(pomodoro.completed(), 1);
    }

    #[test]
    fn every_fourth_pomodoro_earns_a_long_break() {
        let mut pomodoro = Pomodoro::new();
        for _ in 0..3 {
            finish_phase(&mut pomodoro);
            finish_phase(&mut pomodoro);
        }
        assert_eq!(pomodoro.cycle_position(), 3);

        finish_phase(&mut pomodoro);

        assert_eq!(pomodoro.phase(), PomodoroPhase::LongBreak);
        assert_eq!(pomodoro.cycle_position(), 0);
    }

    #[test]
    fn manual_switch_stops_and_reloads_duration() {
        let mut pomodoro = Pomodoro::new();
        pomodoro.start();
        pomodoro.tick();
        assert_eq!(pomodoro.formatted(), "24:59");

        pomodoro.switch_phase(PomodoroPhase::LongBreak);
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.formatted(), "15:00");
        assert_eq!(pomodoro.progress(), 0.0);
    }

    #[test]
    fn reset_keeps_phase() {
        let mut pomodoro = Pomodoro::new();
        pomodoro.switch_phase(PomodoroPhase::ShortBreak);
        pomodoro.start();
        pomodoro.tick();
        pomodoro.reset();

        assert_eq!(pomodoro.phase(), PomodoroPhase::ShortBreak);
        assert_eq!(pomodoro.time_left(), 300);
    }
}
