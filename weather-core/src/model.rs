use serde::{Deserialize, Serialize};

/// Display format of [`WeatherRecord::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// One normalized current-weather observation.
///
/// Temperatures and wind speed are already rounded to one decimal place and
/// the description is capitalized when the record is built by
/// [`crate::normalize::normalize_current`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    /// Local time the observation was retrieved, `dd.mm.yyyy HH:MM`.
    pub timestamp: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub wind_speed: f64,
    pub description: String,
    /// Metres; `None` when the provider did not report it.
    pub visibility: Option<u32>,
}

/// One per-day row of a multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: String,
    pub weekday: String,
    pub time: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub wind_speed: f64,
    pub description: String,
}
