use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_LANG, DEFAULT_UNITS},
    error::{Result, WeatherError},
    model::{ForecastEntry, WeatherRecord},
    normalize::{check_status, normalize_current, normalize_forecast},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: String,
    units: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            units: DEFAULT_UNITS.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// GET `{base_url}/{endpoint}` for `city` and return the checked JSON body.
    async fn fetch(&self, endpoint: &str, city: &str) -> Result<Value> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // OpenWeather reports e.g. unknown cities as 404 with a JSON `cod`/`message` body.
            if let Ok(raw) = serde_json::from_str::<Value>(&body) {
                if let Err(err @ WeatherError::Provider { .. }) = check_status(&raw) {
                    tracing::warn!(%status, %err, "OpenWeather {endpoint} request rejected");
                    return Err(err);
                }
            }

            tracing::warn!(%status, "OpenWeather {endpoint} request failed");
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        let raw: Value = serde_json::from_str(&body)?;
        check_status(&raw)?;

        Ok(raw)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherRecord> {
        let raw = self.fetch("weather", city).await?;

        normalize_current(&raw, city, Local::now().naive_local()).inspect_err(|err| {
            tracing::warn!(%err, city, "unexpected current weather payload");
        })
    }

    async fn forecast(&self, city: &str, days: u8) -> Result<Vec<ForecastEntry>> {
        let raw = self.fetch("forecast", city).await?;

        normalize_forecast(&raw, usize::from(days), &Local).inspect_err(|err| {
            tracing::warn!(%err, city, "unexpected forecast payload");
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
