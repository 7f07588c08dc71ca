pub mod records;
pub mod snapshot;
pub mod source_mode;
pub mod weather_condition;
