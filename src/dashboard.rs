//! This module provides the main entry point: fetch, normalize, aggregate and render
//! a weather dashboard for one city.

use crate::error::DashboardError;
use crate::render::DashboardRenderer;
use crate::table::daily_stats::{aggregate_daily, DailyStatsTable};
use crate::table::forecast_table::ForecastTable;
use crate::table::normalize::{normalize, normalize_current};
use crate::types::snapshot::WeatherSnapshot;
use crate::types::source_mode::SourceMode;
use crate::weather_data::demo::DemoSynthesizer;
use crate::weather_data::fetcher::{OpenWeatherFetcher, WeatherApi};
use crate::weather_data::source::WeatherSource;
use bon::bon;
use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::path::PathBuf;

/// Everything shown on the dashboard, already normalized.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub city: String,
    /// The mode the data actually came from, after any fallback.
    pub mode: SourceMode,
    pub current: WeatherSnapshot,
    pub forecast: ForecastTable,
    pub daily: DailyStatsTable,
}

/// Result of [`WeatherDashboard::create_dashboard`].
#[derive(Debug, Clone)]
pub struct DashboardOutput {
    /// Location of the written PNG.
    pub path: PathBuf,
    pub mode: SourceMode,
    pub data: DashboardData,
}

/// Fetches current weather and the 5-day forecast for a city and renders them.
///
/// Live requests go to OpenWeatherMap. If any request fails, or `use_demo` is set,
/// synthesized data is used instead and the image is marked as demo data.
///
/// # Examples
///
/// ```rust
/// use weather_dashboard::{SourceMode, WeatherDashboard};
///
/// let mut dashboard = WeatherDashboard::builder()
///     .api_key("unused")
///     .city("Coimbatore".to_string())
///     .use_demo(true)
///     .build()
///     .unwrap();
///
/// let data = dashboard.collect().unwrap();
/// assert_eq!(data.mode, SourceMode::Demo);
/// assert_eq!(data.forecast.height(), 40);
/// ```
pub struct WeatherDashboard<A: WeatherApi = OpenWeatherFetcher, R: Rng = ThreadRng> {
    source: WeatherSource<A, R>,
    output_dir: PathBuf,
    renderer: DashboardRenderer,
}

#[bon]
impl WeatherDashboard<OpenWeatherFetcher> {
    /// Creates a dashboard that talks to OpenWeatherMap.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenWeatherMap API key. Ignored when `use_demo` is set.
    /// * `city` - City name passed to the API. Defaults to `"London"`.
    /// * `use_demo` - Start in demo mode without calling the API. Defaults to `false`.
    /// * `output_dir` - Directory for the PNG. Defaults to the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::WeatherData`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        city: Option<String>,
        use_demo: Option<bool>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self, DashboardError> {
        Ok(Self::with_api(
            OpenWeatherFetcher::new(&api_key)?,
            &city.unwrap_or_else(|| "London".to_string()),
            use_demo.unwrap_or(false),
            output_dir.unwrap_or_default(),
        ))
    }
}

impl<A: WeatherApi> WeatherDashboard<A> {
    /// Creates a dashboard backed by any [`WeatherApi`].
    pub fn with_api(api: A, city: &str, use_demo: bool, output_dir: PathBuf) -> Self {
        Self::with_api_and_rng(api, city, use_demo, output_dir, rand::rng())
    }
}

impl<A: WeatherApi, R: Rng> WeatherDashboard<A, R> {
    /// Like [`WeatherDashboard::with_api`], with demo data drawn from `rng`.
    pub fn with_api_and_rng(api: A, city: &str, use_demo: bool, output_dir: PathBuf, rng: R) -> Self {
        let mode = if use_demo {
            SourceMode::Demo
        } else {
            SourceMode::Live
        };
        Self {
            source: WeatherSource::new(api, city, mode, DemoSynthesizer::new(rng)),
            output_dir,
            renderer: DashboardRenderer::default(),
        }
    }

    pub fn mode(&self) -> SourceMode {
        self.source.mode()
    }

    /// Fetches both records and turns them into dashboard data.
    ///
    /// Fetching never fails; network problems switch the dashboard to demo data.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Table`] if a record lacks a required field.
    pub fn collect(&mut self) -> Result<DashboardData, DashboardError> {
        info!("Fetching weather data for {}", self.source.city());
        let current = self.source.fetch_current();
        let forecast = self.source.fetch_forecast();

        let current = normalize_current(&current)?;
        let forecast = normalize(&forecast)?;
        let daily = aggregate_daily(&forecast)?;

        Ok(DashboardData {
            city: self.source.city().to_string(),
            mode: self.source.mode(),
            current,
            forecast,
            daily,
        })
    }

    /// Collects the data and renders it to `weather_dashboard.png`, or
    /// `weather_dashboard_demo.png` when the data is synthesized, inside the output
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoForecastData`] if the forecast has no points, and
    /// propagates normalization and rendering errors.
    pub fn create_dashboard(&mut self) -> Result<DashboardOutput, DashboardError> {
        let data = self.collect()?;
        if data.forecast.is_empty() {
            return Err(DashboardError::NoForecastData(data.city));
        }

        let path = self.output_dir.join(data.mode.output_file_name());
        self.renderer.render(&data, &path)?;

        Ok(DashboardOutput {
            path,
            mode: data.mode,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::error::TableError;
    use crate::types::records::{CurrentRecord, ForecastRecord};
    use crate::weather_data::error::WeatherDataError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Serves fixed records and counts calls.
    struct CannedApi {
        current: CurrentRecord,
        forecast: ForecastRecord,
        calls: Cell<usize>,
    }

    impl WeatherApi for &CannedApi {
        fn current(&self, _city: &str) -> Result<CurrentRecord, WeatherDataError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.current.clone())
        }

        fn forecast(&self, _city: &str) -> Result<ForecastRecord, WeatherDataError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.forecast.clone())
        }
    }

    fn canned(forecast: ForecastRecord) -> CannedApi {
        CannedApi {
            current: CurrentRecord::from(&DemoSynthesizer::default().synthesize_current()),
            forecast,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_builder_defaults() -> Result<(), DashboardError> {
        let dashboard = WeatherDashboard::builder().api_key("key").build()?;
        assert_eq!(dashboard.mode(), SourceMode::Live);
        assert_eq!(dashboard.source.city(), "London");
        assert_eq!(dashboard.output_dir, PathBuf::new());
        Ok(())
    }

    #[test]
    fn test_collect_in_demo_mode() -> Result<(), DashboardError> {
        let mut dashboard = WeatherDashboard::builder()
            .api_key("")
            .city("Coimbatore".to_string())
            .use_demo(true)
            .build()?;
        let data = dashboard.collect()?;

        assert_eq!(data.city, "Coimbatore");
        assert_eq!(data.mode, SourceMode::Demo);
        assert_eq!(data.current.temperature, 18.5);
        assert_eq!(data.forecast.height(), 40);
        assert!(data.daily.height() >= 5 && data.daily.height() <= 6);
        Ok(())
    }

    #[test]
    fn test_collect_uses_live_records() -> Result<(), DashboardError> {
        let mut synthesizer = DemoSynthesizer::default();
        let series = synthesizer.synthesize_forecast(chrono::Utc::now());
        let api = canned(ForecastRecord::from(&series));

        let mut dashboard = WeatherDashboard::with_api(&api, "Paris", false, PathBuf::new());
        let data = dashboard.collect()?;

        assert_eq!(data.mode, SourceMode::Live);
        assert_eq!(api.calls.get(), 2);
        let expected: Vec<_> = series.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(data.forecast.timestamps()?, expected);
        Ok(())
    }

    #[test]
    fn test_seeded_demo_dashboards_match() -> Result<(), DashboardError> {
        let api = canned(ForecastRecord::default());
        let seeded = || {
            WeatherDashboard::with_api_and_rng(&api, "Lima", true, PathBuf::new(), StdRng::seed_from_u64(3))
        };

        let first = seeded().collect()?;
        let second = seeded().collect()?;

        assert_eq!(
            first.forecast.float_column("temperature")?,
            second.forecast.float_column("temperature")?
        );
        assert_eq!(
            first.forecast.float_column("wind_speed")?,
            second.forecast.float_column("wind_speed")?
        );
        assert_eq!(api.calls.get(), 0);
        Ok(())
    }

    #[test]
    fn test_malformed_live_record_is_fatal() {
        let api = canned(ForecastRecord::default());
        let mut dashboard = WeatherDashboard::with_api(&api, "Paris", false, PathBuf::new());

        let result = dashboard.collect();
        assert!(matches!(
            result,
            Err(DashboardError::Table(TableError::MissingField { field: "list", .. }))
        ));
    }

    #[test]
    fn test_empty_forecast_stops_before_rendering() {
        let api = canned(ForecastRecord {
            list: Some(Vec::new()),
            city: None,
        });
        let output_dir = std::env::temp_dir().join("weather_dashboard_empty_forecast");
        let mut dashboard = WeatherDashboard::with_api(&api, "Nowhere", false, output_dir.clone());

        let result = dashboard.create_dashboard();
        assert!(matches!(result, Err(DashboardError::NoForecastData(ref city)) if city == "Nowhere"));
        assert!(!output_dir.join("weather_dashboard.png").exists());
    }
}
