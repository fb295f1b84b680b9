//! Data models for the TempCep service
//!
//! This module contains the domain models organized by concern:
//! - Location: the address record returned by the postal-code lookup
//! - Weather: current conditions and the weather service envelopes
//! - Temperature: the Celsius/Fahrenheit/Kelvin triple served to clients

pub mod location;
pub mod temperature;
pub mod weather;

// Re-export all public types for convenient access
pub use location::CepAddress;
pub use temperature::Temperatures;
pub use weather::CurrentWeather;

/// Substring both upstream services use to flag a failed lookup.
/// Matched anywhere in the raw body, so a field value containing it also trips it.
pub const ERROR_MARKER: &str = "erro";
