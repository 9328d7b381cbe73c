//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and the trait it implements
//! - Normalization of provider payloads into fixed-shape records
//! - The bounded, file-backed lookup history
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use history::{HISTORY_CAPACITY, HistoryCache};
pub use model::{ForecastEntry, WeatherRecord};
pub use provider::{
    DEFAULT_FORECAST_DAYS, FORECAST_DAYS_RANGE, WeatherProvider, openweather::OpenWeatherProvider,
    provider_from_config,
};
