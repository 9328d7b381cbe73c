use crate::{
    Config,
    error::Result,
    model::{ForecastEntry, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Default number of days for a forecast request.
pub const DEFAULT_FORECAST_DAYS: u8 = 5;

/// Inclusive bounds on the number of forecast days a caller may ask for.
pub const FORECAST_DAYS_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for `city`, stamped with the local retrieval time.
    async fn current(&self, city: &str) -> Result<WeatherRecord>;

    /// Up to `days` per-day forecast entries for `city`.
    async fn forecast(&self, city: &str, days: u8) -> Result<Vec<ForecastEntry>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(OpenWeatherProvider::new(api_key)
        .with_base_url(config.base_url())
        .with_lang(config.lang())
        .with_units(config.units()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        // OPENWEATHER_API_KEY may be set on a developer machine.
        if cfg.is_configured() {
            return;
        }

        let err = provider_from_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `weather configure`"));
    }

    #[test]
    fn provider_from_config_uses_configured_settings() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            lang: Some("en".into()),
            base_url: Some("http://localhost:1234/".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).expect("key configured");
        assert_eq!(provider.base_url(), "http://localhost:1234");
        assert_eq!(provider.lang(), "en");
    }

    #[test]
    fn forecast_range_matches_default() {
        assert!(FORECAST_DAYS_RANGE.contains(&DEFAULT_FORECAST_DAYS));
    }
}
