pub mod config;
pub mod host;
pub mod repositories;
pub mod terminal;
pub mod timezone;
