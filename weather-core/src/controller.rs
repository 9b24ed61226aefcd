use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    endpoint::Endpoint,
    error::ControllerError,
    format,
    observable::Observable,
    payload::{
        CurrentConditions, DailyForecastResponse, HistoricalRecord, HourlyForecast, LocationKey,
        PlaceRecord, UvIndex,
    },
    source::WeatherSource,
};

/// Label -> location key, in provider order.
///
/// A repeated label keeps the position of its first occurrence and the key
/// of its last.
#[derive(Debug, Clone, Default)]
pub struct PlaceIndex {
    labels: Vec<String>,
    keys: HashMap<String, LocationKey>,
}

impl PlaceIndex {
    pub fn insert(&mut self, label: String, key: LocationKey) {
        if self.keys.insert(label.clone(), key).is_none() {
            self.labels.push(label);
        }
    }

    pub fn get(&self, label: &str) -> Option<&LocationKey> {
        self.keys.get(label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The observable slots a view binds to. Each holds display-ready text.
#[derive(Debug, Default)]
pub struct WeatherSnapshot {
    pub place: Observable<String>,
    pub weather: Observable<String>,
    pub forecast: Observable<String>,
    pub uv: Observable<String>,
    pub hourly: Observable<String>,
    pub historical: Observable<String>,
}

/// View-model connecting place search and weather lookups to observables.
#[derive(Debug)]
pub struct SearchAndWeatherController<S> {
    source: S,
    places: PlaceIndex,
    snapshot: WeatherSnapshot,
}

impl<S: WeatherSource> SearchAndWeatherController<S> {
    pub fn new(source: S) -> Self {
        Self { source, places: PlaceIndex::default(), snapshot: WeatherSnapshot::default() }
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut WeatherSnapshot {
        &mut self.snapshot
    }

    pub fn places(&self) -> &PlaceIndex {
        &self.places
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the autocomplete search for the current place query and rebuilds
    /// the index from its results. Returns the labels in provider order.
    ///
    /// A blank query clears the index without touching the network. The
    /// index is cleared before the request, so a failed search leaves it
    /// empty.
    pub async fn update_places(&mut self) -> Result<Vec<String>, ControllerError> {
        self.places.clear();

        let query = self.snapshot.place.get().clone();
        if query.trim().is_empty() {
            debug!("blank place query, skipping search");
            return Ok(Vec::new());
        }

        let value = self.source.fetch(Endpoint::Autocomplete.template(), &query).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }

        let records: Vec<PlaceRecord> = decode(Endpoint::Autocomplete, value)?;
        for record in records {
            self.places.insert(record.label(), record.key);
        }

        info!(query = %query, matches = self.places.len(), "place search complete");
        Ok(self.places.labels().to_vec())
    }

    /// Fetches every dataset for a label from the last search and pushes the
    /// formatted text into the matching observables, one category at a time.
    ///
    /// The first failure is returned as-is; observables already updated in
    /// this call keep their new text.
    pub async fn update_all(&mut self, selected: &str) -> Result<(), ControllerError> {
        let key = self
            .places
            .get(selected)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownSelection(selected.to_string()))?;

        info!(place = selected, key = %key, "loading weather");

        let conditions: Vec<CurrentConditions> =
            self.load(Endpoint::CurrentConditions, &key).await?;
        let current = first(Endpoint::CurrentConditions, conditions)?;
        self.snapshot.weather.set(format::current(&current));

        let daily: DailyForecastResponse = self.load(Endpoint::DailyForecast, &key).await?;
        self.snapshot.forecast.set(format::daily_forecast(&daily.daily_forecasts));

        let indices: Vec<UvIndex> = self.load(Endpoint::UvIndex, &key).await?;
        let uv = first(Endpoint::UvIndex, indices)?;
        self.snapshot.uv.set(format::uv_index(&uv));

        let hourly: Vec<HourlyForecast> = self.load(Endpoint::HourlyForecast, &key).await?;
        self.snapshot.hourly.set(format::hourly_forecast(&hourly));

        let history: Vec<HistoricalRecord> = self.load(Endpoint::Historical, &key).await?;
        self.snapshot.historical.set(format::historical(&history));

        Ok(())
    }

    async fn load<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        key: &LocationKey,
    ) -> Result<T, ControllerError> {
        let value = self.source.fetch(endpoint.template(), key.as_str()).await?;
        debug!(%endpoint, "received");
        decode(endpoint, value)
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> Result<T, ControllerError> {
    serde_json::from_value(value).map_err(|e| ControllerError::UnexpectedPayload {
        endpoint: endpoint.as_str(),
        reason: e.to_string(),
    })
}

fn first<T>(endpoint: Endpoint, items: Vec<T>) -> Result<T, ControllerError> {
    items.into_iter().next().ok_or_else(|| ControllerError::UnexpectedPayload {
        endpoint: endpoint.as_str(),
        reason: "empty array".to_string(),
    })
}
