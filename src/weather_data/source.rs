//! The weather source adapter: live API access with a sticky fallback to demo data.

use crate::types::records::{CityInfo, CurrentRecord, ForecastRecord};
use crate::types::source_mode::SourceMode;
use crate::weather_data::demo::DemoSynthesizer;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::fetcher::WeatherApi;
use chrono::{Local, Offset, Utc};
use log::{info, warn};
use rand::Rng;

/// Supplies raw current and forecast records for one city.
///
/// In [`SourceMode::Live`] every call goes to the [`WeatherApi`]. The first failed
/// request is logged and switches the source to [`SourceMode::Demo`] for the rest of
/// its lifetime; from then on the API is never called again and every record is
/// synthesized. Fetching therefore never fails.
pub struct WeatherSource<A: WeatherApi, R: Rng> {
    api: A,
    city: String,
    mode: SourceMode,
    synthesizer: DemoSynthesizer<R>,
}

impl<A: WeatherApi, R: Rng> WeatherSource<A, R> {
    pub fn new(api: A, city: &str, mode: SourceMode, synthesizer: DemoSynthesizer<R>) -> Self {
        if mode.is_demo() {
            info!("Using demo data, no API key required");
        }
        Self {
            api,
            city: city.to_string(),
            mode,
            synthesizer,
        }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn fetch_current(&mut self) -> CurrentRecord {
        if self.mode == SourceMode::Live {
            match self.api.current(&self.city) {
                Ok(record) => return record,
                Err(e) => self.switch_to_demo("current weather", &e),
            }
        }
        CurrentRecord::from(&self.synthesizer.synthesize_current())
    }

    pub fn fetch_forecast(&mut self) -> ForecastRecord {
        if self.mode == SourceMode::Live {
            match self.api.forecast(&self.city) {
                Ok(record) => return record,
                Err(e) => self.switch_to_demo("forecast", &e),
            }
        }
        let mut record = ForecastRecord::from(&self.synthesizer.synthesize_forecast(Utc::now()));
        // Demo data is laid out on the machine's clock.
        record.city = Some(CityInfo {
            name: Some(self.city.clone()),
            timezone: Some(i64::from(Local::now().offset().fix().local_minus_utc())),
        });
        record
    }

    fn switch_to_demo(&mut self, what: &str, error: &WeatherDataError) {
        warn!("Error fetching {} for {}: {}", what, self.city, error);
        if error.is_unauthorized() {
            warn!("API key rejected; a new key may take up to 2 hours to activate");
        }
        warn!("Switching to demo mode for the rest of this run");
        self.mode = SourceMode::Demo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::records::{ConditionEntry, MainBlock, WindBlock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Counts calls and fails the one with index `fail_on`.
    struct FlakyApi {
        calls: Cell<usize>,
        fail_on: Option<usize>,
    }

    impl FlakyApi {
        fn healthy() -> Self {
            Self {
                calls: Cell::new(0),
                fail_on: None,
            }
        }

        fn failing_call(index: usize) -> Self {
            Self {
                calls: Cell::new(0),
                fail_on: Some(index),
            }
        }

        fn attempt(&self, endpoint: &str) -> Result<(), WeatherDataError> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            if self.fail_on == Some(call) {
                let source = serde_json::from_str::<CurrentRecord>("not json").unwrap_err();
                return Err(WeatherDataError::Decode {
                    url: format!("http://test/{}", endpoint),
                    source,
                });
            }
            Ok(())
        }
    }

    impl WeatherApi for &FlakyApi {
        fn current(&self, _city: &str) -> Result<CurrentRecord, WeatherDataError> {
            self.attempt("weather")?;
            Ok(CurrentRecord {
                main: Some(MainBlock {
                    temp: Some(-3.0),
                    feels_like: Some(-7.0),
                    humidity: Some(90.0),
                    pressure: Some(998.0),
                }),
                wind: Some(WindBlock { speed: Some(9.0) }),
                weather: vec![ConditionEntry {
                    main: Some("Snow".to_string()),
                    description: Some("light snow".to_string()),
                }],
            })
        }

        fn forecast(&self, _city: &str) -> Result<ForecastRecord, WeatherDataError> {
            self.attempt("forecast")?;
            Ok(ForecastRecord {
                list: Some(Vec::new()),
                city: None,
            })
        }
    }

    fn source(api: &FlakyApi, mode: SourceMode) -> WeatherSource<&FlakyApi, StdRng> {
        WeatherSource::new(
            api,
            "Oslo",
            mode,
            DemoSynthesizer::new(StdRng::seed_from_u64(11)),
        )
    }

    #[test]
    fn test_live_mode_returns_api_records() {
        let api = FlakyApi::healthy();
        let mut source = source(&api, SourceMode::Live);

        let current = source.fetch_current();
        let forecast = source.fetch_forecast();

        assert_eq!(current.main.and_then(|m| m.temp), Some(-3.0));
        assert_eq!(forecast.list.map(|l| l.len()), Some(0));
        assert_eq!(source.mode(), SourceMode::Live);
        assert_eq!(api.calls.get(), 2);
    }

    #[test]
    fn test_first_failure_switches_to_demo_for_the_rest_of_the_run() {
        let api = FlakyApi::failing_call(0);
        let mut source = source(&api, SourceMode::Live);

        let current = source.fetch_current();
        assert_eq!(source.mode(), SourceMode::Demo);
        assert_eq!(current.main.and_then(|m| m.temp), Some(18.5));

        // The API would succeed now, but it must not be asked again.
        let forecast = source.fetch_forecast();
        let again = source.fetch_current();

        assert_eq!(api.calls.get(), 1);
        assert_eq!(forecast.list.map(|l| l.len()), Some(40));
        assert_eq!(again.weather[0].main.as_deref(), Some("Clouds"));
    }

    #[test]
    fn test_forecast_failure_after_live_current() {
        let api = FlakyApi::failing_call(1);
        let mut source = source(&api, SourceMode::Live);

        let current = source.fetch_current();
        assert_eq!(current.weather[0].main.as_deref(), Some("Snow"));
        assert_eq!(source.mode(), SourceMode::Live);

        let forecast = source.fetch_forecast();
        assert_eq!(source.mode(), SourceMode::Demo);
        assert_eq!(forecast.list.map(|l| l.len()), Some(40));

        source.fetch_current();
        assert_eq!(api.calls.get(), 2);
    }

    #[test]
    fn test_demo_mode_never_calls_the_api() {
        let api = FlakyApi::healthy();
        let mut source = source(&api, SourceMode::Demo);

        source.fetch_current();
        source.fetch_forecast();
        source.fetch_forecast();

        assert_eq!(api.calls.get(), 0);
        assert_eq!(source.mode(), SourceMode::Demo);
        assert_eq!(source.city(), "Oslo");
    }

    #[test]
    fn test_demo_forecast_carries_local_offset() {
        let api = FlakyApi::healthy();
        let mut source = source(&api, SourceMode::Demo);

        let city = source.fetch_forecast().city.unwrap_or_default();
        assert_eq!(city.name.as_deref(), Some("Oslo"));
        assert_eq!(
            city.timezone,
            Some(i64::from(Local::now().offset().fix().local_minus_utc()))
        );
    }
}
