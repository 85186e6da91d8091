//! HTTP access to the two REST endpoints: the station list and a station's
//! historical weather.
//!
//! A failed request is reported immediately. There is no timeout policy,
//! retry or backoff.

use crate::config::ExplorerConfig;
use crate::stations::error::CatalogError;
use crate::types::observation::{HistoricalWeather, Observation};
use crate::types::station::Station;
use crate::weather_data::error::WeatherDataError;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Client for the station/weather API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ExplorerConfig,
    http: Client,
}

// Failure of a single GET, before it is attributed to an operation.
enum RequestFailure {
    Network(String, reqwest::Error),
    Status {
        url: String,
        status: reqwest::StatusCode,
        source: reqwest::Error,
    },
    Parse {
        url: String,
        source: serde_json::Error,
    },
}

impl RequestFailure {
    fn into_catalog(self) -> CatalogError {
        match self {
            RequestFailure::Network(url, e) => CatalogError::NetworkRequest(url, e),
            RequestFailure::Status {
                url,
                status,
                source,
            } => CatalogError::HttpStatus {
                url,
                status,
                source,
            },
            RequestFailure::Parse { url, source } => CatalogError::JsonParse { url, source },
        }
    }

    fn into_weather_data(self) -> WeatherDataError {
        match self {
            RequestFailure::Network(url, e) => WeatherDataError::NetworkRequest(url, e),
            RequestFailure::Status {
                url,
                status,
                source,
            } => WeatherDataError::HttpStatus {
                url,
                status,
                source,
            },
            RequestFailure::Parse { url, source } => WeatherDataError::JsonParse { url, source },
        }
    }
}

impl ApiClient {
    pub fn new(config: ExplorerConfig) -> Self {
        let http = Client::builder()
            .user_agent(config.user_agent())
            .build()
            // Only fails if the TLS backend cannot initialise; fall back to the defaults.
            .unwrap_or_else(|e| {
                warn!("Failed to build configured HTTP client, using defaults: {e}");
                Client::new()
            });
        Self { config, http }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// `GET {base}/stations`
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, CatalogError> {
        let url = self.config.stations_url();
        let stations: Vec<Station> = self
            .get_json(&url, &[])
            .await
            .map_err(RequestFailure::into_catalog)?;
        info!("Fetched {} stations from {}", stations.len(), url);
        Ok(stations)
    }

    /// `GET {base}/historical_weather?station={id}`
    pub async fn fetch_historical_weather(
        &self,
        station: &str,
    ) -> Result<Vec<Observation>, WeatherDataError> {
        let url = self.config.historical_weather_url();
        let weather: HistoricalWeather = self
            .get_json(&url, &[("station", station)])
            .await
            .map_err(RequestFailure::into_weather_data)?;
        info!(
            "Fetched {} observations for station {}",
            weather.points.len(),
            station
        );
        Ok(weather.points)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestFailure> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| RequestFailure::Network(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => RequestFailure::Status {
                        url: url.to_string(),
                        status,
                        source: e,
                    },
                    None => RequestFailure::Network(url.to_string(), e),
                });
            }
        };

        // Read the body first so transport and decoding failures stay distinguishable.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RequestFailure::Network(url.to_string(), e))?;
        serde_json::from_slice(&bytes).map_err(|source| RequestFailure::Parse {
            url: url.to_string(),
            source,
        })
    }
}
