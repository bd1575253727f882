pub mod info_service;
pub mod pomodoro_service;
pub mod refresh_scheduler;
pub mod settings_store;
pub mod stopwatch_service;
pub mod time_source;
pub mod timer_service;
pub mod world_clock_service;

pub use refresh_scheduler::RefreshScheduler;
pub use settings_store::SettingsStore;
pub use time_source::TimeSource;
