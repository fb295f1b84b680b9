//! Error types and handling for the `TempCep` service

use axum::http::StatusCode;
use thiserror::Error;

/// Configuration errors raised while loading settings
#[derive(Error, Debug)]
pub enum TempCepError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TempCepError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Failures of the postal-code lookup
#[derive(Error, Debug)]
pub enum LocationError {
    /// The lookup body carried the error marker
    #[error("can not find zipcode")]
    NotFound,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Failures of the current-weather lookup
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The weather service answered with its error envelope
    #[error("{message}")]
    Service { code: i64, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Every way a `GET /?cep=` request can end early
#[derive(Error, Debug)]
pub enum FindWeatherError {
    #[error("CEP is required")]
    MissingCep,

    #[error("zipcode pattern failed: {0}")]
    Pattern(#[source] regex::Error),

    #[error("invalid zipcode")]
    InvalidFormat,

    #[error("can not find zipcode")]
    LocationNotFound,

    #[error("Error getting CEP info: {0}")]
    LocationLookup(#[source] LocationError),

    #[error("Error getting weather info: {0}")]
    WeatherService(#[source] WeatherError),

    #[error("{0}")]
    Encoding(#[source] serde_json::Error),
}

impl From<LocationError> for FindWeatherError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::NotFound => Self::LocationNotFound,
            other => Self::LocationLookup(other),
        }
    }
}

impl From<WeatherError> for FindWeatherError {
    fn from(err: WeatherError) -> Self {
        Self::WeatherService(err)
    }
}

impl FindWeatherError {
    /// Status codes an error path attempts to write, in order.
    ///
    /// The first one is what reaches the client. The second, when present, is
    /// a follow-up write that the serving layer drops.
    #[must_use]
    pub fn status_writes(&self) -> (StatusCode, Option<StatusCode>) {
        match self {
            Self::MissingCep => (StatusCode::BAD_REQUEST, Some(StatusCode::BAD_REQUEST)),
            Self::Pattern(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
            Self::InvalidFormat => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(StatusCode::UNPROCESSABLE_ENTITY),
            ),
            Self::LocationNotFound => (StatusCode::NOT_FOUND, Some(StatusCode::NOT_FOUND)),
            Self::LocationLookup(_) | Self::WeatherService(_) => (
                StatusCode::BAD_REQUEST,
                Some(StatusCode::INTERNAL_SERVER_ERROR),
            ),
            Self::Encoding(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(StatusCode::INTERNAL_SERVER_ERROR),
            ),
        }
    }

    /// Plain-text body sent to the client, `None` for an empty body
    #[must_use]
    pub fn body(&self) -> Option<String> {
        match self {
            Self::Pattern(_) => None,
            other => Some(other.to_string()),
        }
    }
}
