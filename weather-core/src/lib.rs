//! Core library for the `weather` app.
//!
//! This crate defines:
//! - `Observable`, the change-notifying value cell views bind to
//! - `Debouncer`, which settles typed input before a search is run
//! - `WeatherSource`, the fetch gateway to the weather provider
//! - `SearchAndWeatherController`, the view-model tying them together
//!
//! It is used by `weather-cli`, but any front end that can render strings
//! and emit input events can drive it.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod observable;
pub mod payload;
pub mod source;

pub use config::Config;
pub use controller::{PlaceIndex, SearchAndWeatherController, WeatherSnapshot};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer, Scheduler, TimerHandle, TokioScheduler};
pub use endpoint::Endpoint;
pub use error::{ControllerError, SourceError};
pub use observable::Observable;
pub use payload::LocationKey;
pub use source::{AccuWeatherSource, WeatherSource};
