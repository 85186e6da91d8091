//! Weather readings as returned by the historical weather endpoint.

use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped weather reading at a station.
///
/// Every measurement is optional; a missing value is kept as `None` and never
/// coerced to zero here. Consumers decide how to treat gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub dewpoint: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Eastward wind component.
    #[serde(default)]
    pub wind_x: Option<f64>,
    /// Northward wind component.
    #[serde(default)]
    pub wind_y: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
}

impl Observation {
    /// Creates an observation at `timestamp` with every measurement missing.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            temperature: None,
            dewpoint: None,
            pressure: None,
            wind_x: None,
            wind_y: None,
            precip: None,
        }
    }

    /// Wind speed derived from the two wind components.
    ///
    /// This is the only place wind speed is computed; the summary and the charts
    /// both go through it.
    pub fn wind_speed(&self) -> Option<f64> {
        wind_speed(self.wind_x, self.wind_y)
    }
}

/// Magnitude of the wind vector, `None` unless both components are present.
pub fn wind_speed(wind_x: Option<f64>, wind_y: Option<f64>) -> Option<f64> {
    match (wind_x, wind_y) {
        (Some(x), Some(y)) => Some(x.hypot(y)),
        _ => None,
    }
}

/// Body of `GET /historical_weather?station={id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalWeather {
    pub points: Vec<Observation>,
}
