//! Synthetic weather data for runs without a reachable API.
//!
//! The generated series follows a diurnal-like pattern (sinusoids plus uniform
//! noise) so the charts look plausible, and converts into the same raw record
//! shape the API returns.

use crate::types::snapshot::{ForecastPoint, ForecastSeries, WeatherSnapshot};
use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::f64::consts::PI;

/// Number of points in a synthesized forecast: 5 days of 3-hour steps.
pub const FORECAST_POINTS: usize = 40;
/// Hours between two forecast points.
pub const FORECAST_STEP_HOURS: i64 = 3;

const DEMO_DESCRIPTION: &str = "demo weather";
const CONDITION_WEIGHTS: [(WeatherCondition, f64); 3] = [
    (WeatherCondition::Clear, 0.4),
    (WeatherCondition::Clouds, 0.5),
    (WeatherCondition::Rain, 0.1),
];

/// Generates demo snapshots and forecasts from an injected random source.
///
/// # Examples
///
/// ```rust
/// use weather_dashboard::DemoSynthesizer;
/// use chrono::{TimeZone, Utc};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut synthesizer = DemoSynthesizer::new(StdRng::seed_from_u64(7));
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let series = synthesizer.synthesize_forecast(start);
///
/// assert_eq!(series.len(), 40);
/// assert_eq!(series.points()[0].timestamp, start);
/// ```
pub struct DemoSynthesizer<R: Rng> {
    rng: R,
}

impl Default for DemoSynthesizer<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> DemoSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns a fixed, plausible reading for "now".
    pub fn synthesize_current(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 18.5,
            feels_like: 17.2,
            humidity: 65,
            pressure: 1013,
            wind_speed: 4.5,
            condition: WeatherCondition::Clouds,
            description: "partly cloudy".to_string(),
        }
    }

    /// Generates [`FORECAST_POINTS`] points spaced [`FORECAST_STEP_HOURS`] apart,
    /// the first one at `start` truncated to whole seconds.
    pub fn synthesize_forecast(&mut self, start: DateTime<Utc>) -> ForecastSeries {
        let start = start.trunc_subsecs(0);
        let points = (0..FORECAST_POINTS)
            .map(|i| ForecastPoint {
                timestamp: start + TimeDelta::hours(i as i64 * FORECAST_STEP_HOURS),
                snapshot: self.synthesize_point(i),
            })
            .collect();
        ForecastSeries::new(points)
    }

    fn synthesize_point(&mut self, i: usize) -> WeatherSnapshot {
        let i = i as f64;
        let temperature =
            round_tenth(18.0 + 5.0 * (i * PI / 8.0).sin() + self.rng.random_range(-2.0..2.0));
        let humidity =
            (60.0 + 20.0 * (i * PI / 12.0).sin() + self.rng.random_range(-5.0..5.0)).round();
        let pressure = (1010.0 + 10.0 * (i * PI / 20.0).sin()).round();
        let wind_speed = round_tenth(3.0 + 3.0 * self.rng.random::<f64>());

        WeatherSnapshot {
            temperature,
            feels_like: round_tenth(temperature - 1.5),
            humidity: humidity as i32,
            pressure: pressure as i32,
            wind_speed,
            condition: self.draw_condition(),
            description: DEMO_DESCRIPTION.to_string(),
        }
    }

    fn draw_condition(&mut self) -> WeatherCondition {
        let mut roll = self.rng.random::<f64>();
        for (condition, weight) in &CONDITION_WEIGHTS {
            if roll < *weight {
                return condition.clone();
            }
            roll -= weight;
        }
        // Only reachable through floating point rounding of the weights.
        WeatherCondition::Clouds
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
