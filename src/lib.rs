//! Weather station explorer core.
//!
//! Fetches a catalog of weather stations, filters it for search, and turns a
//! selected station's observation history into summary statistics and
//! chart-ready series. Map and chart drawing are left to implementations of
//! [`MapAdapter`] and [`ChartAdapter`].

mod adapters;
mod api;
mod charts;
mod config;
mod debounce;
mod error;
mod explorer;
mod stations;
mod types;
mod view;
mod weather_data;

pub use error::{ErrorKind, ExplorerError};
pub use explorer::*;

pub use adapters::{redraw_map, ChartAdapter, ChartPanel, ChartSurface, MapAdapter};
pub use api::ApiClient;
pub use charts::{
    format_label, prepare, prepare_frame, ChartData, ChartKind, ChartSpec, Dataset,
    PrecipitationPoint, TemperaturePoint, WindPressurePoint,
};
pub use config::{
    ExplorerConfig, BASE_URL_ENV, DEFAULT_RATE_LIMIT_PER_MINUTE, DEFAULT_SEARCH_DEBOUNCE,
};
pub use debounce::{debounced, DebounceSender, Debounced};
pub use view::{
    format_metric, markers, MapBounds, MapMarker, SelectionView, StationPopup, SummaryCard,
    MISSING,
};

pub use stations::catalog::StationCatalog;
pub use types::observation::{wind_speed, HistoricalWeather, Observation};
pub use types::station::Station;
pub use types::timestamp::parse_timestamp;
pub use weather_data::frame::ObservationFrame;
pub use weather_data::summary::{summarize, summarize_frame, StationSummary};

pub use stations::error::CatalogError;
pub use weather_data::error::WeatherDataError;
