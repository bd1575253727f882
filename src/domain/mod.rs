pub mod entities;
pub mod host;
pub mod repositories;
pub mod value_objects;

pub use entities::clock_settings::{Appearance, ClockMode, ClockSettings, SettingsUpdate, Theme, TimeFormat};
pub use entities::time_snapshot::{DisplayFormat, TimeSnapshot, ZonedTime};
pub use entities::world_clock::WorldClockCity;
