//! Contains `ObservationFrame`, a columnar view of one station's observation history.

use crate::types::observation::Observation;
use crate::weather_data::error::WeatherDataError;
use polars::prelude::*;

pub(crate) const COL_TIMESTAMP: &str = "timestamp_ms";
pub(crate) const COL_TEMPERATURE: &str = "temperature";
pub(crate) const COL_DEWPOINT: &str = "dewpoint";
pub(crate) const COL_PRESSURE: &str = "pressure";
pub(crate) const COL_WIND_SPEED: &str = "wind_speed"; // derived from wind_x / wind_y
pub(crate) const COL_PRECIP: &str = "precip";

/// A wrapper around a Polars `LazyFrame` holding one station's observations in
/// timestamp order.
///
/// Wind speed is materialised once while the frame is built, so every consumer
/// (summary statistics and charts) reads the same derived values. The frame is
/// never empty; constructing it from an empty sequence fails with
/// [`WeatherDataError::NoData`].
#[derive(Clone)]
pub struct ObservationFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
    station: String,
    len: usize,
}

impl ObservationFrame {
    /// Builds the frame for `station` from its observations.
    ///
    /// Observations are expected in ascending timestamp order, as the API returns them.
    pub fn new(station: &str, observations: &[Observation]) -> Result<Self, WeatherDataError> {
        if observations.is_empty() {
            return Err(WeatherDataError::NoData {
                station: station.to_string(),
            });
        }

        let df = df!(
            COL_TIMESTAMP => observations
                .iter()
                .map(|o| o.timestamp.timestamp_millis())
                .collect::<Vec<i64>>(),
            COL_TEMPERATURE => observations.iter().map(|o| o.temperature).collect::<Vec<_>>(),
            COL_DEWPOINT => observations.iter().map(|o| o.dewpoint).collect::<Vec<_>>(),
            COL_PRESSURE => observations.iter().map(|o| o.pressure).collect::<Vec<_>>(),
            COL_WIND_SPEED => observations.iter().map(Observation::wind_speed).collect::<Vec<_>>(),
            COL_PRECIP => observations.iter().map(|o| o.precip).collect::<Vec<_>>()
        )?;

        Ok(Self {
            frame: df.lazy(),
            station: station.to_string(),
            len: observations.len(),
        })
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    /// Number of observations; always at least one.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`, construction rejects empty histories.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a new frame with the predicate applied lazily.
    ///
    /// The result may be empty; it is meant for ad-hoc inspection, the summary
    /// and chart builders always work on the full history.
    pub fn filter(&self, predicate: Expr) -> LazyFrame {
        self.frame.clone().filter(predicate)
    }
}

/// Retrieves a column by name from a DataFrame.
pub(crate) fn get_column<'a>(df: &'a DataFrame, col: &str) -> Result<&'a Column, WeatherDataError> {
    df.column(col)
        .map_err(|e| WeatherDataError::ColumnNotFound(col.to_string(), e))
}

/// All values of a float column, nulls preserved.
pub(crate) fn float_values(df: &DataFrame, col: &str) -> Result<Vec<Option<f64>>, WeatherDataError> {
    let values = get_column(df, col)?.f64()?.into_iter().collect();
    Ok(values)
}

/// Value of a float column at row 0.
pub(crate) fn first_float(df: &DataFrame, col: &str) -> Result<Option<f64>, WeatherDataError> {
    Ok(get_column(df, col)?.f64()?.get(0))
}
