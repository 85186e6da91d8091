//! Defines the weather station record as served by the stations endpoint, together with
//! the implementations needed to place stations in an `rstar` spatial index.

use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

/// A single fixed-location weather station.
///
/// Field names on the wire differ from the Rust names (`station_id`, `station_name`,
/// `station_network`); serde maps them. Stations are immutable once fetched and are
/// identified by [`Station::id`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// Unique station identifier (e.g. "KORD").
    #[serde(rename = "station_id")]
    pub id: String,
    /// Human readable station name.
    #[serde(rename = "station_name")]
    pub name: String,
    /// Observation network the station reports to (e.g. "ASOS").
    #[serde(rename = "station_network")]
    pub network: String,
    /// Latitude in decimal degrees (positive for North).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East).
    pub longitude: f64,
    /// Elevation above sea level in meters.
    pub elevation: f64,
    /// IANA timezone name of the station location.
    pub timezone: String,
}

impl Station {
    /// Case-insensitive substring match against name, id and network.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self.network.to_lowercase().contains(needle)
    }
}

// --- R-Tree Implementations ---

/// A station is a degenerate envelope at its (latitude, longitude) point.
impl RTreeObject for Station {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.latitude, self.longitude])
    }
}

impl PointDistance for Station {
    /// Squared Euclidean distance in degree space. Only used to rank candidates;
    /// final ordering is done with haversine distances.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.latitude - point[0];
        let dy = self.longitude - point[1];
        dx * dx + dy * dy
    }
}
