use crate::api::ApiClient;
use crate::stations::error::CatalogError;
use crate::types::station::Station;
use haversine::{distance, Location as HaversineLocation, Units};
use log::{info, warn};
use rstar::RTree;
use std::cmp::Ordering;
use std::collections::HashSet;

/// The full list of stations, fetched once and never mutated afterwards.
///
/// Order is the order the API returned. Filtering and proximity queries produce
/// derived views borrowing from the catalog.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Station>,
    rtree: RTree<Station>,
}

impl StationCatalog {
    /// Fetches the station list and builds the catalog.
    pub async fn load(client: &ApiClient) -> Result<Self, CatalogError> {
        let fetch_start = std::time::Instant::now();
        let stations = client.fetch_stations().await?;
        let catalog = Self::from_stations(stations);
        info!(
            "Loaded catalog of {} stations in {:?}",
            catalog.len(),
            fetch_start.elapsed()
        );
        Ok(catalog)
    }

    /// Builds a catalog from already fetched records.
    ///
    /// Stations are keyed by id: the first record for an id wins and later duplicates are dropped.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let mut seen = HashSet::with_capacity(stations.len());
        let mut unique = Vec::with_capacity(stations.len());
        for station in stations {
            if seen.insert(station.id.clone()) {
                unique.push(station);
            } else {
                warn!("Dropping duplicate station record for id {}", station.id);
            }
        }
        let rtree = RTree::bulk_load(unique.clone());
        Self {
            stations: unique,
            rtree,
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations in the order the API listed them.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Case-insensitive substring match against name, id or network.
    ///
    /// A blank query returns every station. Catalog order is preserved either way.
    pub fn filter(&self, query: &str) -> Vec<&Station> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.stations.iter().collect();
        }
        self.stations
            .iter()
            .filter(|station| station.matches_lowercase(&needle))
            .collect()
    }

    /// Up to `n_results` stations within `max_distance_km` of a point, closest first,
    /// paired with their haversine distance in kilometers.
    pub fn nearest(
        &self,
        latitude: f64,
        longitude: f64,
        n_results: usize,
        max_distance_km: f64,
    ) -> Vec<(&Station, f64)> {
        if n_results == 0 {
            return vec![];
        }

        // Degree-space neighbours only approximate great-circle order, so over-fetch.
        let candidate_limit = (n_results * 2).max(20);

        let mut stations_with_dist: Vec<(&Station, f64)> = self
            .rtree
            .nearest_neighbor_iter(&[latitude, longitude])
            .take(candidate_limit)
            .filter_map(|station| {
                let dist_km = distance(
                    HaversineLocation {
                        latitude,
                        longitude,
                    },
                    HaversineLocation {
                        latitude: station.latitude,
                        longitude: station.longitude,
                    },
                    Units::Kilometers,
                );
                (dist_km <= max_distance_km).then_some((station, dist_km))
            })
            .collect();

        stations_with_dist.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        stations_with_dist.truncate(n_results);
        stations_with_dist
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn station(id: &str, name: &str, network: &str, lat: f64, lon: f64) -> Station {
        Station {
            id: id.to_string(),
            name: name.to_string(),
            network: network.to_string(),
            latitude: lat,
            longitude: lon,
            elevation: 10.0,
            timezone: "UTC".to_string(),
        }
    }

    pub(crate) fn sample_catalog() -> StationCatalog {
        StationCatalog::from_stations(vec![
            station("KTEST", "Test Field", "IA_ASOS", 41.5, -93.6),
            station("KORD", "Chicago O'Hare", "IL_ASOS", 41.98, -87.93),
            station("KMDW", "Chicago Midway", "IL_ASOS", 41.78, -87.75),
            station("EHAM", "Amsterdam Schiphol", "NL_SYNOP", 52.31, 4.76),
        ])
    }

    fn ids(stations: &[&Station]) -> Vec<String> {
        stations.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let catalog = sample_catalog();
        assert_eq!(ids(&catalog.filter("")), vec!["KTEST", "KORD", "KMDW", "EHAM"]);
        assert_eq!(ids(&catalog.filter("   ")), vec!["KTEST", "KORD", "KMDW", "EHAM"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let catalog = sample_catalog();
        let lower = ids(&catalog.filter("ktest"));
        let upper = ids(&catalog.filter("KTEST"));
        assert_eq!(lower, vec!["KTEST"]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_filter_matches_name_id_and_network() {
        let catalog = sample_catalog();
        assert_eq!(ids(&catalog.filter("chicago")), vec!["KORD", "KMDW"]);
        assert_eq!(ids(&catalog.filter("il_asos")), vec!["KORD", "KMDW"]);
        assert_eq!(ids(&catalog.filter("eham")), vec!["EHAM"]);
        assert!(catalog.filter("no such station").is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_catalog() {
        let catalog = sample_catalog();
        let _ = catalog.filter("chicago");
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.stations()[0].id, "KTEST");
    }

    #[test]
    fn test_duplicates_are_dropped_first_wins() {
        let catalog = StationCatalog::from_stations(vec![
            station("A", "First", "N", 0.0, 0.0),
            station("B", "Other", "N", 1.0, 1.0),
            station("A", "Second", "N", 2.0, 2.0),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A").unwrap().name, "First");
        assert!(catalog.get("C").is_none());
    }

    #[test]
    fn test_nearest_sorted_and_bounded() {
        let catalog = sample_catalog();
        let near = catalog.nearest(41.9, -87.8, 5, 100.0);
        let near_ids: Vec<&str> = near.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(near_ids.len(), 2);
        assert!(near_ids.contains(&"KORD") && near_ids.contains(&"KMDW"));
        assert!(near[0].1 <= near[1].1);
        assert!(near.iter().all(|(_, d)| *d <= 100.0));

        assert!(catalog.nearest(41.9, -87.8, 0, 100.0).is_empty());
        assert_eq!(catalog.nearest(41.9, -87.8, 1, 10_000.0).len(), 1);
    }
}
