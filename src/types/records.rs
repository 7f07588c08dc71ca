//! Raw, nested records in the shape of the OpenWeatherMap `weather` and `forecast`
//! endpoints.
//!
//! Every field is optional: the decoder accepts any JSON object, and checking that
//! the expected fields are present is left to [`crate::normalize`], which reports
//! shape violations as [`crate::TableError::MissingField`].

use crate::types::snapshot::{ForecastSeries, WeatherSnapshot};
use serde::{Deserialize, Serialize};

/// The `main` block: temperatures, humidity and pressure.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MainBlock {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WindBlock {
    pub speed: Option<f64>,
}

/// One entry of the `weather` list. The API sends a list, but only the first
/// entry is meaningful for a dashboard.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ConditionEntry {
    pub main: Option<String>,
    pub description: Option<String>,
}

/// Response of the current-weather endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentRecord {
    pub main: Option<MainBlock>,
    pub wind: Option<WindBlock>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

/// One 3-hour step of the forecast endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ForecastItem {
    /// Forecast time as Unix epoch seconds (UTC).
    pub dt: Option<i64>,
    pub main: Option<MainBlock>,
    pub wind: Option<WindBlock>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CityInfo {
    pub name: Option<String>,
    /// Shift in seconds from UTC.
    pub timezone: Option<i64>,
}

/// Response of the 5 day / 3 hour forecast endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ForecastRecord {
    pub list: Option<Vec<ForecastItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<CityInfo>,
}

impl From<&WeatherSnapshot> for MainBlock {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        Self {
            temp: Some(snapshot.temperature),
            feels_like: Some(snapshot.feels_like),
            humidity: Some(f64::from(snapshot.humidity)),
            pressure: Some(f64::from(snapshot.pressure)),
        }
    }
}

impl From<&WeatherSnapshot> for ConditionEntry {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        Self {
            main: Some(snapshot.condition.as_str().to_string()),
            description: Some(snapshot.description.clone()),
        }
    }
}

impl From<&WeatherSnapshot> for CurrentRecord {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        Self {
            main: Some(MainBlock::from(snapshot)),
            wind: Some(WindBlock {
                speed: Some(snapshot.wind_speed),
            }),
            weather: vec![ConditionEntry::from(snapshot)],
        }
    }
}

impl From<&ForecastSeries> for ForecastRecord {
    fn from(series: &ForecastSeries) -> Self {
        let list = series
            .points()
            .iter()
            .map(|point| ForecastItem {
                dt: Some(point.timestamp.timestamp()),
                main: Some(MainBlock::from(&point.snapshot)),
                wind: Some(WindBlock {
                    speed: Some(point.snapshot.wind_speed),
                }),
                weather: vec![ConditionEntry::from(&point.snapshot)],
            })
            .collect();
        Self {
            list: Some(list),
            city: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::weather_condition::WeatherCondition;

    #[test]
    fn test_decodes_openweathermap_current_payload() -> Result<(), serde_json::Error> {
        let json = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "main": {"temp": 14.2, "feels_like": 13.5, "temp_min": 12.9, "temp_max": 15.3,
                     "pressure": 1012, "humidity": 81},
            "wind": {"speed": 4.1, "deg": 80},
            "dt": 1560350645,
            "name": "London"
        }"#;
        let record: CurrentRecord = serde_json::from_str(json)?;
        let main = record.main.unwrap_or_default();
        assert_eq!(main.temp, Some(14.2));
        assert_eq!(main.humidity, Some(81.0));
        assert_eq!(record.wind.and_then(|w| w.speed), Some(4.1));
        assert_eq!(record.weather[0].main.as_deref(), Some("Clouds"));
        Ok(())
    }

    #[test]
    fn test_missing_weather_list_decodes_as_empty() -> Result<(), serde_json::Error> {
        let record: CurrentRecord = serde_json::from_str(r#"{"main": {"temp": 1.0}}"#)?;
        assert!(record.weather.is_empty());
        assert!(record.wind.is_none());
        Ok(())
    }

    #[test]
    fn test_snapshot_serializes_in_api_shape() -> Result<(), serde_json::Error> {
        let snapshot = WeatherSnapshot {
            temperature: 18.5,
            feels_like: 17.2,
            humidity: 65,
            pressure: 1013,
            wind_speed: 4.5,
            condition: WeatherCondition::Clouds,
            description: "partly cloudy".to_string(),
        };
        let value = serde_json::to_value(CurrentRecord::from(&snapshot))?;
        assert_eq!(value["main"]["temp"], 18.5);
        assert_eq!(value["main"]["pressure"], 1013.0);
        assert_eq!(value["wind"]["speed"], 4.5);
        assert_eq!(value["weather"][0]["main"], "Clouds");
        assert_eq!(value["weather"][0]["description"], "partly cloudy");
        Ok(())
    }
}
