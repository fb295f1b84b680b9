//! Weather API client for WeatherAPI integration
//!
//! Fetches the current temperature for a locality name. WeatherAPI reports
//! failures in a JSON error envelope; this client surfaces its message.

use crate::error::WeatherError;
use crate::models::weather::{CurrentWeatherResponse, WeatherApiErrorResponse};
use crate::models::{CurrentWeather, ERROR_MARKER};
use reqwest::Client;
use tracing::{debug, instrument};

/// Client for the WeatherAPI `current.json` endpoint
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    /// Create a client sending requests to `base_url` (e.g. `http://api.weatherapi.com`)
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Get the current temperature for a locality.
    ///
    /// A body containing the error marker is decoded as the service's error
    /// envelope and returned as [`WeatherError::Service`].
    #[instrument(skip(self))]
    pub async fn current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        let url = format!(
            "{}/v1/current.json?key={}&q={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(location)
        );
        debug!("Calling WeatherAPI for: {}", location);

        let body = self.client.get(url).send().await?.text().await?;

        if body.contains(ERROR_MARKER) {
            let envelope: WeatherApiErrorResponse = serde_json::from_str(&body)?;
            debug!(
                code = envelope.error.code,
                "WeatherAPI rejected the lookup: {}", envelope.error.message
            );
            return Err(WeatherError::Service {
                code: envelope.error.code,
                message: envelope.error.message,
            });
        }

        let response: CurrentWeatherResponse = serde_json::from_str(&body)?;
        debug!(
            "Current temperature in {}: {:.1}°C / {:.1}°F",
            location, response.current.temp_c, response.current.temp_f
        );

        Ok(response.current)
    }
}
