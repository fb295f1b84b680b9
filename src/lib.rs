//! `TempCep` - current temperature for a Brazilian postal code
//!
//! This library resolves a CEP to its locality through ViaCEP, looks up the
//! current weather for that locality through WeatherAPI, and serves the
//! temperature in Celsius, Fahrenheit and Kelvin over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod telemetry;
pub mod validation;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use crate::config::ServiceConfig;
pub use error::{FindWeatherError, LocationError, TempCepError, WeatherError};
pub use location_resolver::LocationResolver;
pub use models::{CepAddress, CurrentWeather, Temperatures};
pub use validation::verify_valid_cep;
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
