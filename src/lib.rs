mod dashboard;
mod error;
mod render;
mod table;
mod types;
mod weather_data;

pub use dashboard::*;
pub use error::DashboardError;

pub use render::error::RenderError;
pub use render::stats::{gaussian_kde, histogram, title_case, HistogramBin};
pub use render::DashboardRenderer;

pub use table::daily_stats::*;
pub use table::error::{RecordLocation, TableError};
pub use table::forecast_table::ForecastTable;
pub use table::normalize::{normalize, normalize_current, normalize_series, utc_offset};

pub use types::records::*;
pub use types::snapshot::*;
pub use types::source_mode::SourceMode;
pub use types::weather_condition::WeatherCondition;

pub use weather_data::demo::DemoSynthesizer;
pub use weather_data::error::WeatherDataError;
pub use weather_data::fetcher::{OpenWeatherFetcher, WeatherApi};
pub use weather_data::source::WeatherSource;
