pub mod clock_settings;
pub mod time_snapshot;
pub mod world_clock;
