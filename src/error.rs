use crate::render::error::RenderError;
use crate::table::error::TableError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("No forecast data available for '{0}'")]
    NoForecastData(String),
}
