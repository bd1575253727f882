pub mod calendar_names;
