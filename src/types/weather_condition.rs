//! Defines the `WeatherCondition` enum, mapping OpenWeatherMap's condition groups
//! (the `weather[].main` field) to descriptive variants.

use std::fmt;

/// Represents the condition group reported by OpenWeatherMap.
///
/// The API reports a coarse category (`"Clear"`, `"Clouds"`, `"Rain"`, ...) next to a
/// free-text description. See the
/// [OpenWeatherMap documentation](https://openweathermap.org/weather-conditions)
/// for the official list of groups.
///
/// Unknown groups are kept verbatim in [`WeatherCondition::Other`] so a new category
/// on the API side never breaks normalization.
///
/// # Examples
///
/// ```rust
/// use weather_dashboard::WeatherCondition;
///
/// assert_eq!(WeatherCondition::from_api_str("Clouds"), WeatherCondition::Clouds);
/// assert_eq!(WeatherCondition::Rain.as_str(), "Rain");
/// assert_eq!(
///     WeatherCondition::from_api_str("Volcano"),
///     WeatherCondition::Other("Volcano".to_string())
/// );
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum WeatherCondition {
    /// Clear sky.
    Clear,
    /// Few to overcast clouds.
    Clouds,
    /// Light to extreme rain, including showers.
    Rain,
    /// Drizzle of any intensity.
    Drizzle,
    /// Thunderstorm, with or without rain.
    Thunderstorm,
    /// Snow, sleet and freezing rain.
    Snow,
    /// Mist.
    Mist,
    /// Smoke.
    Smoke,
    /// Haze.
    Haze,
    /// Dust or sand/dust whirls.
    Dust,
    /// Fog.
    Fog,
    /// Sand.
    Sand,
    /// Volcanic ash.
    Ash,
    /// Squalls.
    Squall,
    /// Tornado.
    Tornado,
    /// Any group not listed above, kept as reported.
    Other(String),
}

impl WeatherCondition {
    /// Maps the `main` field of an OpenWeatherMap condition entry to a variant.
    /// Matching is case-sensitive, as the API always capitalises groups.
    pub fn from_api_str(value: &str) -> Self {
        match value {
            "Clear" => WeatherCondition::Clear,
            "Clouds" => WeatherCondition::Clouds,
            "Rain" => WeatherCondition::Rain,
            "Drizzle" => WeatherCondition::Drizzle,
            "Thunderstorm" => WeatherCondition::Thunderstorm,
            "Snow" => WeatherCondition::Snow,
            "Mist" => WeatherCondition::Mist,
            "Smoke" => WeatherCondition::Smoke,
            "Haze" => WeatherCondition::Haze,
            "Dust" => WeatherCondition::Dust,
            "Fog" => WeatherCondition::Fog,
            "Sand" => WeatherCondition::Sand,
            "Ash" => WeatherCondition::Ash,
            "Squall" => WeatherCondition::Squall,
            "Tornado" => WeatherCondition::Tornado,
            other => WeatherCondition::Other(other.to_string()),
        }
    }

    /// Returns the group name exactly as the API spells it.
    pub fn as_str(&self) -> &str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Smoke => "Smoke",
            WeatherCondition::Haze => "Haze",
            WeatherCondition::Dust => "Dust",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Sand => "Sand",
            WeatherCondition::Ash => "Ash",
            WeatherCondition::Squall => "Squall",
            WeatherCondition::Tornado => "Tornado",
            WeatherCondition::Other(name) => name,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
