pub mod json_settings_repository;
pub mod memory_settings_repository;

pub use json_settings_repository::JsonSettingsRepository;
pub use memory_settings_repository::MemorySettingsRepository;
