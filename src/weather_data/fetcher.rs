use crate::types::records::{CurrentRecord, ForecastRecord};
use crate::weather_data::error::WeatherDataError;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// A remote source of raw weather records.
///
/// [`OpenWeatherFetcher`] is the production implementation; tests substitute their
/// own to simulate failures.
pub trait WeatherApi {
    /// Fetches current conditions for `city`.
    fn current(&self, city: &str) -> Result<CurrentRecord, WeatherDataError>;

    /// Fetches the 5 day / 3 hour forecast for `city`.
    fn forecast(&self, city: &str) -> Result<ForecastRecord, WeatherDataError>;
}

/// Blocking client for the OpenWeatherMap 2.5 API, always requesting metric units.
pub struct OpenWeatherFetcher {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherFetcher {
    pub fn new(api_key: &str) -> Result<Self, WeatherDataError> {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Creates a fetcher against a different host, e.g. a local mirror of the API.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, WeatherDataError> {
        let client = Client::builder()
            .build()
            .map_err(WeatherDataError::ClientBuild)?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, WeatherDataError> {
        let url = self.endpoint_url(endpoint);
        info!("Requesting {} for {}", url, city);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e.status());
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .text()
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;
        debug!("Received {} bytes from {}", body.len(), url);

        decode(url, &body)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

fn decode<T: DeserializeOwned>(url: String, body: &str) -> Result<T, WeatherDataError> {
    serde_json::from_str(body).map_err(|source| WeatherDataError::Decode { url, source })
}

impl WeatherApi for OpenWeatherFetcher {
    fn current(&self, city: &str) -> Result<CurrentRecord, WeatherDataError> {
        self.get("weather", city)
    }

    fn forecast(&self, city: &str) -> Result<ForecastRecord, WeatherDataError> {
        let record: ForecastRecord = self.get("forecast", city)?;
        if let Some(info) = &record.city {
            debug!(
                "Forecast resolved city {:?} (UTC offset {:?}s)",
                info.name, info.timezone
            );
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() -> Result<(), WeatherDataError> {
        let fetcher = OpenWeatherFetcher::with_base_url("key", "http://localhost:8080/data/2.5/")?;
        assert_eq!(fetcher.endpoint_url("weather"), "http://localhost:8080/data/2.5/weather");

        let fetcher = OpenWeatherFetcher::new("key")?;
        assert_eq!(
            fetcher.endpoint_url("forecast"),
            "http://api.openweathermap.org/data/2.5/forecast"
        );
        Ok(())
    }

    #[test]
    fn test_decodes_forecast_body_with_city_offset() -> Result<(), WeatherDataError> {
        let body = r#"{
            "cod": "200",
            "cnt": 1,
            "list": [{
                "dt": 1704067200,
                "main": {"temp": 21.3, "feels_like": 21.0, "pressure": 1011, "humidity": 70},
                "weather": [{"main": "Rain", "description": "light rain"}],
                "wind": {"speed": 3.2}
            }],
            "city": {"name": "Coimbatore", "timezone": 19800}
        }"#;
        let record: ForecastRecord = decode("http://test/forecast".to_string(), body)?;

        let city = record.city.unwrap_or_default();
        assert_eq!(city.name.as_deref(), Some("Coimbatore"));
        assert_eq!(city.timezone, Some(19_800));
        assert_eq!(record.list.map(|list| list.len()), Some(1));
        Ok(())
    }

    #[test]
    fn test_malformed_body_is_a_decode_error() {
        let result = decode::<CurrentRecord>("http://test/weather".to_string(), "<html>");
        match result {
            Err(WeatherDataError::Decode { url, .. }) => assert_eq!(url, "http://test/weather"),
            other => panic!("expected a decode error, got {:?}", other.map(|_| ())),
        }
    }
}
