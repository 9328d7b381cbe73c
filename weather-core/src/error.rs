use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while fetching or normalizing provider data.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request to weather provider failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response that does not carry a provider error payload.
    #[error("weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The provider answered with a `cod` other than 200.
    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("failed to parse provider JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is missing from the payload or has the wrong type.
    #[error("unexpected data format: missing field `{field}`")]
    Format { field: String },
}

impl WeatherError {
    pub fn format(field: impl Into<String>) -> Self {
        Self::Format { field: field.into() }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
