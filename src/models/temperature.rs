//! Temperature triple served to clients

use serde::{Deserialize, Serialize};

use super::CurrentWeather;

/// Whole-degree offset between Celsius and Kelvin (not 273.15)
pub const KELVIN_OFFSET: f64 = 273.0;

/// Temperature in the three scales returned by `GET /?cep=`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Temperatures {
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl Temperatures {
    /// Keep the upstream Celsius and Fahrenheit values, derive Kelvin locally
    #[must_use]
    pub fn from_reading(reading: &CurrentWeather) -> Self {
        Self {
            celsius: reading.temp_c,
            fahrenheit: reading.temp_f,
            kelvin: Self::celsius_to_kelvin(reading.temp_c),
        }
    }

    #[must_use]
    pub fn celsius_to_kelvin(celsius: f64) -> f64 {
        celsius + KELVIN_OFFSET
    }
}

impl From<CurrentWeather> for Temperatures {
    fn from(reading: CurrentWeather) -> Self {
        Self::from_reading(&reading)
    }
}
