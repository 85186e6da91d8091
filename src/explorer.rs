//! This module provides the main entry point: `StationExplorer`, the application state
//! that ties the station catalog, the weather API and the view models together.
//!
//! All state lives in the explorer value itself, so several explorers (for example
//! one per test) can coexist without sharing anything.

use crate::adapters::{redraw_map, ChartAdapter, ChartPanel, MapAdapter};
use crate::api::ApiClient;
use crate::charts::{prepare_frame, ChartData};
use crate::config::ExplorerConfig;
use crate::debounce::Debounced;
use crate::error::ExplorerError;
use crate::stations::catalog::StationCatalog;
use crate::types::station::Station;
use crate::view::{markers, MapBounds, MapMarker, SelectionView, SummaryCard};
use crate::weather_data::frame::ObservationFrame;
use crate::weather_data::summary::{summarize_frame, StationSummary};
use bon::bon;
use futures_util::future::{AbortHandle, AbortRegistration, Abortable};
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Represents a geographical coordinate using latitude and longitude.
///
/// # Examples
///
/// ```
/// use station_explorer::LatLon;
///
/// let chicago = LatLon(41.88, -87.63);
/// assert_eq!(chicago.0, 41.88); // Latitude
/// assert_eq!(chicago.1, -87.63); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The filtered station view for one search query.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    pub query: String,
    /// Matching stations in catalog order.
    pub stations: Vec<&'a Station>,
    pub markers: Vec<MapMarker>,
    /// Bounds to fit the map to, `None` when nothing matched.
    pub bounds: Option<MapBounds>,
}

/// Everything derived for one selected station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    pub station: Station,
    pub summary: StationSummary,
    pub charts: ChartData,
    pub card: SummaryCard,
}

/// Outcome of a station selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Completed(Box<StationReport>),
    /// A newer selection started before this one finished; its response was discarded.
    Superseded { station: String },
}

// Tracks the newest selection so stale responses can be cancelled or ignored.
#[derive(Debug, Default)]
struct SelectionTracker {
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl SelectionTracker {
    /// Starts a new selection, aborting the fetch of the previous one.
    fn begin(&self) -> (u64, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = in_flight.replace(handle) {
            previous.abort();
        }
        (generation, registration)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// The station explorer application state.
///
/// Create one with [`StationExplorer::new`], which fetches the station catalog once.
/// After that, [`search`](StationExplorer::search) filters the catalog locally and
/// [`select_station`](StationExplorer::select_station) fetches and summarizes one
/// station's history.
///
/// # Examples
///
/// ```no_run
/// # use station_explorer::{ExplorerConfig, ExplorerError, Selection, StationExplorer};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ExplorerError> {
/// let config = ExplorerConfig::builder().base_url("https://weather.example.com/api").build();
/// let explorer = StationExplorer::new(config).await?;
///
/// let results = explorer.search("chicago");
/// println!("{} stations match", results.stations.len());
///
/// if let Some(first) = results.stations.first() {
///     if let Selection::Completed(report) = explorer.select_station(&first.id).await? {
///         println!("Average temperature: {}", report.card.avg_temp);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct StationExplorer {
    client: ApiClient,
    catalog: StationCatalog,
    selection: SelectionTracker,
}

#[bon]
impl StationExplorer {
    /// Finds catalog stations near a location, closest first.
    ///
    /// This method uses a builder pattern.
    ///
    /// * `.location(LatLon)`: **Required.** Search center.
    /// * `.max_distance_km(f64)`: Optional. Search radius, defaults to `50.0`.
    /// * `.station_limit(usize)`: Optional. Maximum number of stations, defaults to `5`.
    ///
    /// Returns `(station, distance_km)` pairs.
    #[builder]
    pub fn nearby(
        &self,
        location: LatLon,
        max_distance_km: Option<f64>,
        station_limit: Option<usize>,
    ) -> Vec<(Station, f64)> {
        let max_distance_km = max_distance_km.unwrap_or(50.0);
        let station_limit = station_limit.unwrap_or(5);
        self.catalog
            .nearest(location.0, location.1, station_limit, max_distance_km)
            .into_iter()
            .map(|(station, distance)| (station.clone(), distance))
            .collect()
    }
}

impl StationExplorer {
    /// Fetches the station catalog and creates the explorer.
    ///
    /// # Errors
    ///
    /// [`ExplorerError::Catalog`] if the station list cannot be fetched or parsed.
    pub async fn new(config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = ApiClient::new(config);
        let catalog = StationCatalog::load(&client).await?;
        Ok(Self::with_catalog(client, catalog))
    }

    /// Creates an explorer over an already loaded catalog.
    pub fn with_catalog(client: ApiClient, catalog: StationCatalog) -> Self {
        Self {
            client,
            catalog,
            selection: SelectionTracker::default(),
        }
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ExplorerConfig {
        self.client.config()
    }

    /// Filters the catalog and prepares the map view of the result.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let stations = self.catalog.filter(query);
        debug!("Search '{}' matched {} stations", query, stations.len());
        SearchResults {
            query: query.to_string(),
            markers: markers(stations.iter().copied()),
            bounds: MapBounds::enclosing(stations.iter().copied()),
            stations,
        }
    }

    /// Runs the debounced search pipeline until the input closes.
    ///
    /// Each coalesced query is filtered and drawn on `map`. Returns the number of
    /// filter passes performed.
    pub async fn drive_search<M: MapAdapter>(
        &self,
        input: &mut Debounced<String>,
        map: &mut M,
    ) -> usize {
        let mut passes = 0;
        while let Some(query) = input.next().await {
            let results = self.search(&query);
            redraw_map(map, &results.markers, results.bounds);
            passes += 1;
        }
        passes
    }

    /// Fetches the selected station's history and derives its summary and charts.
    ///
    /// Starting a selection cancels the weather fetch of any selection still in
    /// flight; that older call then returns [`Selection::Superseded`].
    ///
    /// # Errors
    ///
    /// * [`ExplorerError::UnknownStation`] if `station_id` is not in the catalog.
    /// * [`ExplorerError::WeatherData`] for fetch or parse failures, and with
    ///   [`WeatherDataError::NoData`](crate::WeatherDataError::NoData) when the
    ///   station has no observations.
    pub async fn select_station(&self, station_id: &str) -> Result<Selection, ExplorerError> {
        let station = self
            .catalog
            .get(station_id)
            .ok_or_else(|| ExplorerError::UnknownStation(station_id.to_string()))?
            .clone();

        let (generation, registration) = self.selection.begin();
        info!("Selecting station {} (selection #{})", station.id, generation);

        let fetch = Abortable::new(
            self.client.fetch_historical_weather(&station.id),
            registration,
        );
        let fetched = match fetch.await {
            Ok(result) => result,
            Err(_aborted) => {
                info!("Weather fetch for {} cancelled by a newer selection", station.id);
                return Ok(Selection::Superseded { station: station.id });
            }
        };
        if !self.selection.is_current(generation) {
            info!("Discarding stale weather response for {}", station.id);
            return Ok(Selection::Superseded { station: station.id });
        }
        let observations = fetched?;

        let frame = ObservationFrame::new(&station.id, &observations)?;
        let summary = summarize_frame(&frame)?;
        let charts = prepare_frame(&frame)?;
        let card = SummaryCard::new(&station, &summary);
        Ok(Selection::Completed(Box::new(StationReport {
            station,
            summary,
            charts,
            card,
        })))
    }

    /// Selects a station and updates the chart panel, converting every failure into
    /// a visible state.
    ///
    /// Returns `None` when the selection was superseded and nothing should change.
    pub async fn present_selection<A: ChartAdapter>(
        &self,
        station_id: &str,
        panel: &mut ChartPanel<A>,
    ) -> Option<SelectionView> {
        match self.select_station(station_id).await {
            Ok(Selection::Completed(report)) => {
                panel.render(&report.charts);
                let report = *report;
                Some(SelectionView::Ready {
                    card: report.card,
                    charts: report.charts,
                })
            }
            Ok(Selection::Superseded { .. }) => None,
            Err(e) => {
                info!("Selection of {} failed: {}", station_id, e);
                panel.clear();
                Some(SelectionView::from_error(&e))
            }
        }
    }
}
