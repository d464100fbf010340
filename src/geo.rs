use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Geographic point in floating degrees.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

pub(crate) fn ensure_finite(point: GeoPoint) -> Result<(), AnalysisError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidInput(format!(
            "non-finite coordinates ({}, {})",
            point.lat, point.lng
        )))
    }
}

/// Distance metric between two geographic points.
///
/// All thresholds in this crate (notably the nearby radius) are expressed in
/// the same unit the configured strategy returns.
pub trait DistanceStrategy {
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// Planar Euclidean distance on raw degree pairs.
///
/// Not geodesic. At the scale of a single country 0.1 degree approximates
/// ~10 km at the reference latitude, which is close enough for ranking
/// candidate sites, and the planar form keeps the station scan cheap.
/// Substitute a geodesic strategy through
/// `SiteAnalyzerBuilder::distance_strategy` when real distances matter;
/// the scorer and financial model are unaffected by the choice.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlanarDegreeDistance;

impl DistanceStrategy for PlanarDegreeDistance {
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let dx = a.lat - b.lat;
        let dy = a.lng - b.lng;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_is_euclidean_on_degrees() {
        let a = GeoPoint::new(39.0, 32.0);
        let b = GeoPoint::new(42.0, 36.0);

        let d = PlanarDegreeDistance.distance(a, b);

        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn planar_distance_is_symmetric() {
        let a = GeoPoint::new(41.0082, 28.9784);
        let b = GeoPoint::new(39.9334, 32.8597);

        let strategy = PlanarDegreeDistance;
        assert_eq!(strategy.distance(a, b), strategy.distance(b, a));
    }

    #[test]
    fn non_finite_points_are_rejected() {
        assert!(ensure_finite(GeoPoint::new(39.0, 32.0)).is_ok());
        assert!(ensure_finite(GeoPoint::new(f64::NAN, 32.0)).is_err());
        assert!(ensure_finite(GeoPoint::new(39.0, f64::INFINITY)).is_err());
    }
}
