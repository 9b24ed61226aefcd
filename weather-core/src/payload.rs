//! Typed views of the provider JSON the app reads.
//!
//! Only the fields that end up on screen are declared; everything else in
//! the payload is ignored.

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

/// Opaque provider identifier for a resolved place. The provider may send it
/// as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LocationKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawKey {
            Text(String),
            Number(Number),
        }

        Ok(match RawKey::deserialize(deserializer)? {
            RawKey::Text(s) => LocationKey(s),
            RawKey::Number(n) => LocationKey(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    #[serde(rename = "LocalizedName")]
    pub localized_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRecord {
    #[serde(rename = "LocalizedName")]
    pub localized_name: String,
    #[serde(rename = "Country")]
    pub country: Named,
    #[serde(rename = "AdministrativeArea")]
    pub administrative_area: Named,
    #[serde(rename = "Key")]
    pub key: LocationKey,
}

impl PlaceRecord {
    pub fn label(&self) -> String {
        format!(
            "{}, {}, {}",
            self.localized_name, self.country.localized_name, self.administrative_area.localized_name
        )
    }
}

/// `{ "Value": 22.5 }`; the number is kept verbatim so it prints as sent.
#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    #[serde(rename = "Value")]
    pub value: Number,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricReading {
    #[serde(rename = "Metric")]
    pub metric: Reading,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "WeatherText")]
    pub weather_text: String,
    #[serde(rename = "Temperature")]
    pub temperature: MetricReading,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureRange {
    #[serde(rename = "Minimum")]
    pub minimum: Reading,
    #[serde(rename = "Maximum")]
    pub maximum: Reading,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: TemperatureRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecastResponse {
    #[serde(rename = "DailyForecasts")]
    pub daily_forecasts: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UvIndex {
    #[serde(rename = "Category")]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyForecast {
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "Temperature")]
    pub temperature: Reading,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "LocalObservationDateTime")]
    pub local_observation_date_time: String,
    #[serde(rename = "Temperature")]
    pub temperature: MetricReading,
}
