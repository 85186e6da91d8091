//! demos/explore.rs
//!
//! Loads the station catalog, searches it for a query and prints the summary of the
//! first matching station. Map and chart output go to the console.
//!
//! To run this demo:
//! STATION_EXPLORER_API_BASE=https://weather.example.com/api cargo run --example explore -- chicago

use std::error::Error;

use station_explorer::{
    ChartAdapter, ChartPanel, ChartSpec, ExplorerConfig, MapAdapter, MapBounds, MapMarker,
    SelectionView, StationExplorer,
};

struct ConsoleMap;

impl MapAdapter for ConsoleMap {
    fn clear(&mut self) {
        println!("[map] cleared");
    }

    fn add_markers(&mut self, markers: &[MapMarker]) {
        for marker in markers {
            println!(
                "[map] {:>8} {:<32} ({:.3}, {:.3})",
                marker.popup.station_id, marker.popup.title, marker.lat, marker.lon
            );
        }
    }

    fn fit_bounds(&mut self, bounds: MapBounds) {
        let (lat, lon) = bounds.center();
        println!("[map] centered on ({lat:.3}, {lon:.3})");
    }
}

struct ConsoleChart;

impl ChartAdapter for ConsoleChart {
    type Chart = String;

    fn create(&mut self, spec: &ChartSpec) -> String {
        let name = format!("{:?}", spec.kind);
        let series: Vec<&str> = spec.datasets.iter().map(|d| d.name).collect();
        println!(
            "[chart] {name}: {} points, series {}",
            spec.labels.len(),
            series.join(", ")
        );
        name
    }

    fn destroy(&mut self, chart: String) {
        println!("[chart] {chart} destroyed");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let query = std::env::args().nth(1).unwrap_or_default();

    // 1. Load the catalog once
    let explorer = StationExplorer::new(ExplorerConfig::from_env()?).await?;
    println!("Loaded {} stations", explorer.catalog().len());

    // 2. Filter and draw the map
    let results = explorer.search(&query);
    station_explorer::redraw_map(&mut ConsoleMap, &results.markers, results.bounds);

    // 3. Show the first match in detail
    let Some(station) = results.stations.first() else {
        println!("No stations match '{query}'");
        return Ok(());
    };
    let mut panel = ChartPanel::new(|_| ConsoleChart);
    match explorer.present_selection(&station.id, &mut panel).await {
        Some(SelectionView::Ready { card, .. }) => {
            println!("{} ({})", card.station_name, card.station_id);
            println!("  Current temperature: {}", card.current_temp);
            println!("  Average temperature: {}", card.avg_temp);
            println!("  Temperature range:   {}", card.temp_range);
            println!("  Average pressure:    {}", card.avg_pressure);
            println!("  Average wind speed:  {}", card.avg_wind_speed);
            println!("  Observations:        {}", card.observations);
        }
        Some(SelectionView::NoData { message }) | Some(SelectionView::Error { message, .. }) => {
            println!("{message}");
        }
        None => {}
    }

    Ok(())
}
