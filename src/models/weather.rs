//! Current weather reading and the WeatherAPI response envelopes

use serde::{Deserialize, Serialize};

/// Current temperature as reported upstream
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Temperature in Fahrenheit
    pub temp_f: f64,
}

/// `GET /v1/current.json` success body
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CurrentWeatherResponse {
    pub current: CurrentWeather,
}

/// `GET /v1/current.json` failure body
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct WeatherApiErrorResponse {
    pub error: WeatherApiError,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct WeatherApiError {
    pub code: i64,
    pub message: String,
}
