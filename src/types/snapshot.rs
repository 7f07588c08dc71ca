//! Typed weather readings: a single [`WeatherSnapshot`] and the [`ForecastSeries`]
//! built from timestamped snapshots.

use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, Utc};

/// A weather reading for a single instant.
#[derive(Debug, PartialEq, Clone)]
pub struct WeatherSnapshot {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Perceived temperature in °C.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Atmospheric pressure at sea level in hPa.
    pub pressure: i32,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    pub condition: WeatherCondition,
    pub description: String,
}

/// One `(timestamp, snapshot)` pair of a forecast.
#[derive(Debug, PartialEq, Clone)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub snapshot: WeatherSnapshot,
}

/// An ordered sequence of forecast points.
///
/// Points are kept in the order they were produced. Series coming from the demo
/// synthesizer are strictly increasing with a fixed 3-hour step; series decoded
/// from the API keep whatever order the API returned (which is chronological).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if every timestamp is strictly later than the one before it.
    pub fn is_strictly_increasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp)
    }
}
