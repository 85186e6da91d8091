//! Seams to the map and chart rendering libraries.
//!
//! Drawing itself happens outside this crate. These traits fix what the explorer
//! hands over, and [`ChartSurface`] enforces that a drawing surface holds at most
//! one chart at a time.

use crate::charts::{ChartData, ChartKind, ChartSpec};
use crate::view::{MapBounds, MapMarker};
use log::debug;

/// A clustered-marker map.
pub trait MapAdapter {
    /// Removes every marker.
    fn clear(&mut self);
    fn add_markers(&mut self, markers: &[MapMarker]);
    fn fit_bounds(&mut self, bounds: MapBounds);
}

/// Clears the map, draws `markers` and fits the view to `bounds` if there are any.
pub fn redraw_map<M: MapAdapter + ?Sized>(
    map: &mut M,
    markers: &[MapMarker],
    bounds: Option<MapBounds>,
) {
    map.clear();
    map.add_markers(markers);
    if let Some(bounds) = bounds {
        map.fit_bounds(bounds);
    }
}

/// A charting backend able to create and destroy chart instances.
pub trait ChartAdapter {
    /// Handle to a live chart.
    type Chart;

    fn create(&mut self, spec: &ChartSpec) -> Self::Chart;
    fn destroy(&mut self, chart: Self::Chart);
}

/// One drawing surface. Rendering replaces the previous chart, destroying it
/// first; dropping the surface destroys whatever it still holds.
pub struct ChartSurface<A: ChartAdapter> {
    adapter: A,
    kind: ChartKind,
    current: Option<A::Chart>,
}

impl<A: ChartAdapter> ChartSurface<A> {
    pub fn new(kind: ChartKind, adapter: A) -> Self {
        Self {
            adapter,
            kind,
            current: None,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn render(&mut self, data: &ChartData) {
        self.clear();
        let spec = data.spec(self.kind);
        debug!("Rendering {:?} chart with {} points", self.kind, spec.labels.len());
        self.current = Some(self.adapter.create(&spec));
    }

    /// Destroys the current chart, if any.
    pub fn clear(&mut self) {
        if let Some(chart) = self.current.take() {
            self.adapter.destroy(chart);
        }
    }
}

impl<A: ChartAdapter> Drop for ChartSurface<A> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// The detail panel's three charts.
pub struct ChartPanel<A: ChartAdapter> {
    surfaces: Vec<ChartSurface<A>>,
}

impl<A: ChartAdapter> ChartPanel<A> {
    /// Creates one surface per [`ChartKind`], asking `make_adapter` for each backend.
    pub fn new(mut make_adapter: impl FnMut(ChartKind) -> A) -> Self {
        Self {
            surfaces: ChartKind::ALL
                .iter()
                .map(|&kind| ChartSurface::new(kind, make_adapter(kind)))
                .collect(),
        }
    }

    pub fn render(&mut self, data: &ChartData) {
        for surface in &mut self.surfaces {
            surface.render(data);
        }
    }

    pub fn clear(&mut self) {
        for surface in &mut self.surfaces {
            surface.clear();
        }
    }

    pub fn surface(&self, kind: ChartKind) -> Option<&ChartSurface<A>> {
        self.surfaces.iter().find(|s| s.kind() == kind)
    }
}
