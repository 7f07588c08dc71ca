//! Contains the `ForecastTable` structure, the flat, row-per-timestamp view of a
//! forecast used by the dashboard.

use crate::table::error::{RecordLocation, TableError};
use crate::types::snapshot::ForecastSeries;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use log::debug;
use polars::prelude::*;

/// Columns holding the readings summarized by [`ForecastTable::summary`].
const SUMMARY_COLUMNS: [&str; 3] = ["temperature", "humidity", "wind_speed"];
const SUMMARY_STATISTICS: [&str; 6] = ["count", "mean", "std", "min", "50%", "max"];

/// A wrapper around a Polars `DataFrame` with one row per forecast point.
///
/// Columns:
///
/// | name          | type               |
/// |---------------|--------------------|
/// | `datetime`    | `Datetime(ms)`, UTC |
/// | `temperature` | `f64`, °C          |
/// | `feels_like`  | `f64`, °C          |
/// | `humidity`    | `i32`, %           |
/// | `pressure`    | `i32`, hPa         |
/// | `wind_speed`  | `f64`, m/s         |
/// | `weather`     | `str`, condition group |
/// | `description` | `str`              |
///
/// Timestamps are stored in UTC. The table also carries the forecast location's
/// offset from UTC, which decides calendar days and chart labels.
///
/// Instances are produced by [`crate::normalize`] or [`ForecastTable::from_series`].
#[derive(Debug, Clone)]
pub struct ForecastTable {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
    utc_offset: FixedOffset,
}

impl ForecastTable {
    /// Builds the table from a typed series, keeping point order. The offset is UTC
    /// until set with [`ForecastTable::with_utc_offset`].
    pub fn from_series(series: &ForecastSeries) -> Result<Self, TableError> {
        let points = series.points();

        let datetime: Vec<NaiveDateTime> =
            points.iter().map(|p| p.timestamp.naive_utc()).collect();
        let temperature: Vec<f64> = points.iter().map(|p| p.snapshot.temperature).collect();
        let feels_like: Vec<f64> = points.iter().map(|p| p.snapshot.feels_like).collect();
        let humidity: Vec<i32> = points.iter().map(|p| p.snapshot.humidity).collect();
        let pressure: Vec<i32> = points.iter().map(|p| p.snapshot.pressure).collect();
        let wind_speed: Vec<f64> = points.iter().map(|p| p.snapshot.wind_speed).collect();
        let weather: Vec<&str> = points.iter().map(|p| p.snapshot.condition.as_str()).collect();
        let description: Vec<&str> = points
            .iter()
            .map(|p| p.snapshot.description.as_str())
            .collect();

        let frame = df!(
            "datetime" => datetime,
            "temperature" => temperature,
            "feels_like" => feels_like,
            "humidity" => humidity,
            "pressure" => pressure,
            "wind_speed" => wind_speed,
            "weather" => weather,
            "description" => description
        )?;
        debug!("Normalized forecast into frame of shape {:?}", frame.shape());

        Ok(Self {
            frame,
            utc_offset: Utc.fix(),
        })
    }

    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    fn column(&self, name: &'static str) -> Result<&Column, TableError> {
        self.frame
            .column(name)
            .map_err(|e| TableError::ColumnNotFound(name, e))
    }

    /// Returns the `datetime` column as UTC timestamps.
    pub fn timestamps(&self) -> Result<Vec<DateTime<Utc>>, TableError> {
        let column = self.column("datetime")?;
        let unit = match column.dtype() {
            DataType::Datetime(unit, _) => *unit,
            _ => TimeUnit::Milliseconds,
        };
        let raw = column.cast(&DataType::Int64)?;

        raw.i64()?
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let location = RecordLocation::ForecastPoint(i);
                let value = value.ok_or(TableError::MissingField {
                    field: "datetime",
                    location,
                })?;
                let decoded = match unit {
                    TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
                    TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
                    TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
                };
                decoded.ok_or(TableError::InvalidTimestamp { value, location })
            })
            .collect()
    }

    /// Returns the `datetime` column in the table's local time.
    pub fn local_timestamps(&self) -> Result<Vec<DateTime<FixedOffset>>, TableError> {
        Ok(self
            .timestamps()?
            .iter()
            .map(|ts| ts.with_timezone(&self.utc_offset))
            .collect())
    }

    /// Returns a numeric column as `f64`, with nulls as `NaN`.
    pub fn float_column(&self, name: &'static str) -> Result<Vec<f64>, TableError> {
        let values = self.column(name)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    /// Counts rows per condition group, most frequent first (ties by name).
    pub fn condition_counts(&self) -> Result<Vec<(String, i64)>, TableError> {
        let counts = self
            .frame
            .clone()
            .lazy()
            .group_by([col("weather")])
            .agg([col("datetime").count().cast(DataType::Int64).alias("count")])
            .sort(
                ["count", "weather"],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        let names = counts.column("weather")?.str()?;
        let values = counts.column("count")?.i64()?;
        Ok(names
            .into_iter()
            .zip(values.into_iter())
            .filter_map(|(name, count)| Some((name?.to_string(), count?)))
            .collect())
    }

    /// Summarizes temperature, humidity and wind speed.
    ///
    /// The returned frame has a `statistic` column (`count`, `mean`, `std`, `min`,
    /// `50%`, `max`) and one `f64` column per summarized reading. `std` uses one
    /// degree of freedom and is null for fewer than two rows.
    pub fn summary(&self) -> Result<DataFrame, TableError> {
        let mut columns = vec![Column::new("statistic".into(), SUMMARY_STATISTICS)];

        for name in SUMMARY_COLUMNS {
            let value = || col(name).cast(DataType::Float64);
            let stats = self
                .frame
                .clone()
                .lazy()
                .select([
                    value().count().cast(DataType::Float64).alias("count"),
                    value().mean().alias("mean"),
                    value().std(1).alias("std"),
                    value().min().alias("min"),
                    value().median().alias("50%"),
                    value().max().alias("max"),
                ])
                .collect()?;

            let row = SUMMARY_STATISTICS
                .iter()
                .map(|stat| Ok(stats.column(stat)?.f64()?.get(0)))
                .collect::<Result<Vec<Option<f64>>, PolarsError>>()?;
            columns.push(Column::new(name.into(), row));
        }

        Ok(DataFrame::new(columns)?)
    }
}
