pub mod daily_stats;
pub mod error;
pub mod forecast_table;
pub mod normalize;
