use crate::stations::error::CatalogError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

/// The three failure classes an operation can surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-success HTTP status.
    Fetch,
    /// Response body was not the expected JSON.
    Parse,
    /// The selected station has no observations.
    NoData,
}

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error("Station '{0}' is not in the catalog")]
    UnknownStation(String),

    #[error("API base URL is not configured (set {0})")]
    MissingBaseUrl(&'static str),
}

impl ExplorerError {
    /// Classifies the error for display. Every error is terminal for the one
    /// operation that produced it; none is fatal to the application.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExplorerError::Catalog(CatalogError::JsonParse { .. })
            | ExplorerError::WeatherData(WeatherDataError::JsonParse { .. }) => ErrorKind::Parse,
            ExplorerError::WeatherData(WeatherDataError::NoData { .. }) => ErrorKind::NoData,
            // Frame failures only arise from records that did not have the expected shape.
            ExplorerError::WeatherData(WeatherDataError::DataFrameProcessing(_))
            | ExplorerError::WeatherData(WeatherDataError::ColumnNotFound(..))
            | ExplorerError::WeatherData(WeatherDataError::InvalidTimestamp(_)) => ErrorKind::Parse,
            _ => ErrorKind::Fetch,
        }
    }

    /// Short message suitable for showing in place of the failed content.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Fetch => format!("Could not load data: {self}. Try again."),
            ErrorKind::Parse => format!("Received malformed data: {self}."),
            ErrorKind::NoData => "No weather data available for this station.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_json() -> serde_json::Error {
        serde_json::from_str::<Vec<u8>>("{").unwrap_err()
    }

    #[test]
    fn test_kinds() {
        let parse = ExplorerError::from(CatalogError::JsonParse {
            url: "http://x/stations".into(),
            source: bad_json(),
        });
        assert_eq!(parse.kind(), ErrorKind::Parse);

        let no_data = ExplorerError::from(WeatherDataError::NoData {
            station: "KORD".into(),
        });
        assert_eq!(no_data.kind(), ErrorKind::NoData);
        assert_eq!(
            no_data.user_message(),
            "No weather data available for this station."
        );

        assert_eq!(
            ExplorerError::UnknownStation("nope".into()).kind(),
            ErrorKind::Fetch
        );
    }
}
