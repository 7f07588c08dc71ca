//! Flattens raw, nested weather records into typed snapshots and forecast tables.
//!
//! The API's response shape is matched defensively: every field the dashboard needs
//! is checked, the first entry of the `weather` list is used as the condition, and
//! anything absent is reported as [`TableError::MissingField`].

use crate::table::error::{RecordLocation, TableError};
use crate::table::forecast_table::ForecastTable;
use crate::types::records::{ConditionEntry, CurrentRecord, ForecastRecord, MainBlock, WindBlock};
use crate::types::snapshot::{ForecastPoint, ForecastSeries, WeatherSnapshot};
use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, FixedOffset};

fn required<T>(
    value: Option<T>,
    field: &'static str,
    location: RecordLocation,
) -> Result<T, TableError> {
    value.ok_or(TableError::MissingField { field, location })
}

fn snapshot_from_blocks(
    main: Option<&MainBlock>,
    wind: Option<&WindBlock>,
    weather: &[ConditionEntry],
    location: RecordLocation,
) -> Result<WeatherSnapshot, TableError> {
    let main = required(main, "main", location)?;
    let wind = required(wind, "wind", location)?;
    let condition = required(weather.first(), "weather[0]", location)?;

    Ok(WeatherSnapshot {
        temperature: required(main.temp, "main.temp", location)?,
        feels_like: required(main.feels_like, "main.feels_like", location)?,
        humidity: required(main.humidity, "main.humidity", location)?.round() as i32,
        pressure: required(main.pressure, "main.pressure", location)?.round() as i32,
        wind_speed: required(wind.speed, "wind.speed", location)?,
        condition: WeatherCondition::from_api_str(required(
            condition.main.as_deref(),
            "weather[0].main",
            location,
        )?),
        description: required(
            condition.description.clone(),
            "weather[0].description",
            location,
        )?,
    })
}

/// Reads the current-conditions record into a [`WeatherSnapshot`].
///
/// # Errors
///
/// Returns [`TableError::MissingField`] if any of `main.temp`, `main.feels_like`,
/// `main.humidity`, `main.pressure`, `wind.speed` or the first `weather` entry with
/// its `main` and `description` is absent.
pub fn normalize_current(record: &CurrentRecord) -> Result<WeatherSnapshot, TableError> {
    snapshot_from_blocks(
        record.main.as_ref(),
        record.wind.as_ref(),
        &record.weather,
        RecordLocation::Current,
    )
}

/// Decodes every item of a forecast record into a [`ForecastSeries`], keeping the
/// order of `list`. Epoch seconds in `dt` become UTC timestamps.
pub fn normalize_series(record: &ForecastRecord) -> Result<ForecastSeries, TableError> {
    let items = required(record.list.as_ref(), "list", RecordLocation::Forecast)?;

    let points = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let location = RecordLocation::ForecastPoint(i);
            let dt = required(item.dt, "dt", location)?;
            let timestamp = DateTime::from_timestamp(dt, 0)
                .ok_or(TableError::InvalidTimestamp { value: dt, location })?;
            let snapshot = snapshot_from_blocks(
                item.main.as_ref(),
                item.wind.as_ref(),
                &item.weather,
                location,
            )?;
            Ok(ForecastPoint {
                timestamp,
                snapshot,
            })
        })
        .collect::<Result<Vec<_>, TableError>>()?;

    Ok(ForecastSeries::new(points))
}

/// Reads `city.timezone` (seconds east of UTC). A record without it is taken to be
/// in UTC.
pub fn utc_offset(record: &ForecastRecord) -> Result<FixedOffset, TableError> {
    let seconds = record
        .city
        .as_ref()
        .and_then(|city| city.timezone)
        .unwrap_or(0);
    i32::try_from(seconds)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or(TableError::InvalidUtcOffset(seconds))
}

/// Flattens a forecast record into a [`ForecastTable`] with one row per point, in
/// input order, local to the record's `city.timezone`.
///
/// # Examples
///
/// ```rust
/// use weather_dashboard::{normalize, ForecastRecord};
///
/// let json = r#"{"list": [{
///     "dt": 1704067200,
///     "main": {"temp": 4.2, "feels_like": 1.0, "humidity": 87, "pressure": 1002},
///     "wind": {"speed": 5.1},
///     "weather": [{"main": "Rain", "description": "light rain"}]
/// }]}"#;
/// let record: ForecastRecord = serde_json::from_str(json).unwrap();
/// let table = normalize(&record).unwrap();
///
/// assert_eq!(table.height(), 1);
/// assert_eq!(table.float_column("temperature").unwrap(), vec![4.2]);
/// ```
pub fn normalize(record: &ForecastRecord) -> Result<ForecastTable, TableError> {
    let series = normalize_series(record)?;
    Ok(ForecastTable::from_series(&series)?.with_utc_offset(utc_offset(record)?))
}
