use polars::error::PolarsError;
use thiserror::Error;

/// Where in a raw record a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLocation {
    /// The current-conditions record.
    Current,
    /// The forecast record itself, outside any single point.
    Forecast,
    /// The forecast item with this index in `list`.
    ForecastPoint(usize),
}

impl std::fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordLocation::Current => write!(f, "current conditions"),
            RecordLocation::Forecast => write!(f, "forecast"),
            RecordLocation::ForecastPoint(i) => write!(f, "forecast point {}", i),
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Missing required field '{field}' in {location}")]
    MissingField {
        field: &'static str,
        location: RecordLocation,
    },

    #[error("Timestamp {value} of {location} is out of range")]
    InvalidTimestamp {
        value: i64,
        location: RecordLocation,
    },

    #[error("UTC offset of {0} seconds is out of range")]
    InvalidUtcOffset(i64),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(&'static str, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
