//! View models handed to the presentation layer.
//!
//! Nothing here produces markup; a templating or component layer renders these
//! structures however it likes.

use crate::charts::ChartData;
use crate::error::{ErrorKind, ExplorerError};
use crate::types::station::Station;
use crate::weather_data::summary::StationSummary;
use rstar::AABB;

/// Placeholder shown for an aggregate that could not be computed.
pub const MISSING: &str = "—";

/// Popup content for one station marker.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPopup {
    pub title: String,
    pub station_id: String,
    pub network: String,
    /// `(label, value)` rows, already formatted.
    pub details: Vec<(&'static str, String)>,
}

impl StationPopup {
    pub fn for_station(station: &Station) -> Self {
        Self {
            title: station.name.clone(),
            station_id: station.id.clone(),
            network: station.network.clone(),
            details: vec![
                (
                    "Location",
                    format!("{:.4}, {:.4}", station.latitude, station.longitude),
                ),
                ("Elevation", format!("{:.0} m", station.elevation)),
                ("Timezone", station.timezone.clone()),
            ],
        }
    }
}

/// One map marker: a position plus the popup shown when it is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub popup: StationPopup,
}

impl MapMarker {
    pub fn for_station(station: &Station) -> Self {
        Self {
            lat: station.latitude,
            lon: station.longitude,
            popup: StationPopup::for_station(station),
        }
    }
}

pub fn markers<'a>(stations: impl IntoIterator<Item = &'a Station>) -> Vec<MapMarker> {
    stations.into_iter().map(MapMarker::for_station).collect()
}

/// Geographic bounding box used to fit the map to a set of stations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl MapBounds {
    /// Smallest box containing every station, `None` for an empty set.
    pub fn enclosing<'a>(stations: impl IntoIterator<Item = &'a Station>) -> Option<Self> {
        let points: Vec<[f64; 2]> = stations
            .into_iter()
            .map(|s| [s.latitude, s.longitude])
            .collect();
        if points.is_empty() {
            return None;
        }
        let envelope = AABB::from_points(points.iter());
        let [south, west] = envelope.lower();
        let [north, east] = envelope.upper();
        Some(Self {
            south,
            west,
            north,
            east,
        })
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }
}

/// Formats an optional value with one decimal and a unit, or [`MISSING`].
pub fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1} {unit}"),
        _ => MISSING.to_string(),
    }
}

/// Display-ready statistics for the selected station.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub station_name: String,
    pub station_id: String,
    pub current_temp: String,
    pub avg_temp: String,
    pub temp_range: String,
    pub avg_pressure: String,
    pub avg_wind_speed: String,
    pub observations: String,
}

impl SummaryCard {
    pub fn new(station: &Station, summary: &StationSummary) -> Self {
        Self {
            station_name: station.name.clone(),
            station_id: station.id.clone(),
            current_temp: format_metric(summary.current_temp, "°C"),
            avg_temp: format_metric(summary.avg_temp, "°C"),
            temp_range: format_metric(summary.temp_range, "°C"),
            avg_pressure: format_metric(summary.avg_pressure, "hPa"),
            avg_wind_speed: format_metric(Some(summary.avg_wind_speed), "m/s"),
            observations: summary.count.to_string(),
        }
    }
}

/// What the detail panel shows after a selection finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionView {
    Ready {
        card: SummaryCard,
        charts: ChartData,
    },
    /// The station exists but has no observations.
    NoData { message: String },
    Error { kind: ErrorKind, message: String },
}

impl SelectionView {
    pub fn from_error(error: &ExplorerError) -> Self {
        match error.kind() {
            ErrorKind::NoData => SelectionView::NoData {
                message: error.user_message(),
            },
            kind => SelectionView::Error {
                kind,
                message: error.user_message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::catalog::tests::{sample_catalog, station};
    use crate::weather_data::error::WeatherDataError;

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(15.0), "°C"), "15.0 °C");
        assert_eq!(format_metric(Some(-3.26), "°C"), "-3.3 °C");
        assert_eq!(format_metric(None, "hPa"), "—");
        assert_eq!(format_metric(Some(f64::NAN), "hPa"), "—");
    }

    #[test]
    fn test_summary_card_renders_missing_values() {
        let summary = StationSummary {
            current_temp: None,
            avg_temp: None,
            min_temp: None,
            max_temp: None,
            temp_range: None,
            avg_pressure: Some(1013.26),
            avg_wind_speed: 0.0,
            count: 3,
        };
        let card = SummaryCard::new(&station("KTEST", "Test", "N", 0.0, 0.0), &summary);
        assert_eq!(card.current_temp, "—");
        assert_eq!(card.avg_temp, "—");
        assert_eq!(card.temp_range, "—");
        assert_eq!(card.avg_pressure, "1013.3 hPa");
        assert_eq!(card.avg_wind_speed, "0.0 m/s");
        assert_eq!(card.observations, "3");
    }

    #[test]
    fn test_bounds() {
        let catalog = sample_catalog();
        let bounds = MapBounds::enclosing(catalog.filter("chicago")).unwrap();
        assert_eq!(bounds.south, 41.78);
        assert_eq!(bounds.north, 41.98);
        assert_eq!(bounds.west, -87.93);
        assert_eq!(bounds.east, -87.75);
        assert!(MapBounds::enclosing(catalog.filter("zzz")).is_none());
    }

    #[test]
    fn test_markers_and_popup() {
        let catalog = sample_catalog();
        let markers = markers(catalog.filter("KORD"));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].lat, 41.98);
        assert_eq!(markers[0].popup.title, "Chicago O'Hare");
        assert_eq!(markers[0].popup.details[1], ("Elevation", "10 m".to_string()));
    }

    #[test]
    fn test_selection_view_from_error() {
        let no_data = ExplorerError::from(WeatherDataError::NoData {
            station: "KTEST".into(),
        });
        assert!(matches!(
            SelectionView::from_error(&no_data),
            SelectionView::NoData { .. }
        ));
        assert!(matches!(
            SelectionView::from_error(&ExplorerError::UnknownStation("X".into())),
            SelectionView::Error {
                kind: ErrorKind::Fetch,
                ..
            }
        ));
    }
}
