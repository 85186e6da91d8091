use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse weather data from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    // Empty observation history, callers render a "no data" state instead of statistics
    #[error("No weather data found for station '{station}'")]
    NoData { station: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Timestamp {0} ms is outside the supported date range")]
    InvalidTimestamp(i64),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),
}
