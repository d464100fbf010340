//! Nearby-station and nearest-region resolution.

use crate::error::AnalysisError;
use crate::geo::{ensure_finite, DistanceStrategy, GeoPoint};
use crate::records::{RecordStore, RegionRecord, StationRecord};
use log::*;

/// Read-only proximity queries over a frozen record store.
///
/// Pure: the index never mutates the store and holds no state of its own
/// beyond the configured radius, so concurrent queries from separate
/// indexes (or the same one behind a shared reference) are independent.
pub struct ProximityIndex<'a> {
    store: &'a RecordStore,
    strategy: &'a dyn DistanceStrategy,
    radius: f64,
}

impl<'a> ProximityIndex<'a> {
    pub fn new(store: &'a RecordStore, strategy: &'a dyn DistanceStrategy, radius: f64) -> Self {
        ProximityIndex {
            store,
            strategy,
            radius,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Stations strictly inside the radius around `point`.
    ///
    /// The queried point itself is not a station; a station exactly on the
    /// radius boundary does not count.
    pub fn nearby(&self, point: GeoPoint) -> Result<Vec<&'a StationRecord>, AnalysisError> {
        ensure_finite(point)?;

        Ok(self
            .store
            .stations()
            .iter()
            .filter(|station| self.strategy.distance(point, station.position) < self.radius)
            .collect())
    }

    /// The region whose center is closest to `point`, or `None` when the
    /// store holds no regions.
    ///
    /// Ties resolve to the earliest region in store insertion order, which
    /// keeps repeated calls reproducible.
    pub fn nearest_region(&self, point: GeoPoint) -> Result<Option<&'a RegionRecord>, AnalysisError> {
        ensure_finite(point)?;

        let mut best: Option<(&RegionRecord, f64)> = None;

        for region in self.store.regions() {
            let distance = self.strategy.distance(point, region.center);

            // Strict '<' keeps the earliest entry on exact ties.
            if best.map(|(_, d)| distance < d).unwrap_or(true) {
                best = Some((region, distance));
            }
        }

        if let Some((region, distance)) = best {
            debug!(
                "nearest region to ({:.4}, {:.4}): {} at {:.4}",
                point.lat, point.lng, region.name, distance
            );
        }

        Ok(best.map(|(region, _)| region))
    }
}
