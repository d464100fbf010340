//! Site potential scoring: local competition pressure blended with the
//! matched region's demand signals into a single comparable 0-10 score.

use crate::error::AnalysisError;
use crate::geo::GeoPoint;
use crate::proximity::ProximityIndex;
use crate::records::RegionRecord;
use log::*;
use serde::{Deserialize, Serialize};

const REGION_POTENTIAL_WEIGHT: f64 = 0.4;
const COMPETITION_WEIGHT: f64 = 0.3;
const TRAFFIC_WEIGHT: f64 = 0.3;

/// Neutral score assigned when no region can be matched to the point.
const FALLBACK_SCORE: f64 = 5.0;

/// How crowded the immediate neighborhood of a candidate site is.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum CompetitionTier {
    Low,
    Medium,
    High,
}

impl CompetitionTier {
    /// Zero nearby stations is Low, fewer than three is Medium, three or
    /// more is High.
    pub fn from_station_count(count: usize) -> Self {
        if count == 0 {
            CompetitionTier::Low
        } else if count < 3 {
            CompetitionTier::Medium
        } else {
            CompetitionTier::High
        }
    }
}

/// Discrete banding of the composite score for quick triage.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum PotentialBand {
    High,
    Moderate,
    Low,
}

impl PotentialBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            PotentialBand::High
        } else if score >= 5.0 {
            PotentialBand::Moderate
        } else {
            PotentialBand::Low
        }
    }
}

/// Result of scoring one candidate site.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiteScore {
    /// Name of the nearest region, if any region is known.
    pub region: Option<String>,
    pub nearby_stations: usize,
    pub competition: CompetitionTier,
    /// Composite potential score, rounded to one decimal.
    pub potential: f64,
    /// Full record of the matched region so callers need not re-resolve it.
    pub region_record: Option<RegionRecord>,
}

impl SiteScore {
    pub fn band(&self) -> PotentialBand {
        PotentialBand::from_score(self.potential)
    }
}

/// Score a candidate site.
///
/// With a matched region the composite is
/// `0.4 * region.potential + 0.3 * (10 - c) + 0.3 * (region.traffic_density * 10)`
/// where `c` is the nearby-station count; without one the score falls back
/// to a neutral 5.0 and only the competition tier carries information.
pub fn score_site(
    point: GeoPoint,
    index: &ProximityIndex<'_>,
) -> Result<SiteScore, AnalysisError> {
    let nearby = index.nearby(point)?;
    let count = nearby.len();
    let competition = CompetitionTier::from_station_count(count);
    let region = index.nearest_region(point)?;

    let potential = match region {
        // (10 - c) is deliberately unclamped: more than ten nearby stations
        // drags the composite below the regional baseline.
        Some(region) => {
            REGION_POTENTIAL_WEIGHT * region.potential
                + COMPETITION_WEIGHT * (10.0 - count as f64)
                + TRAFFIC_WEIGHT * (region.traffic_density * 10.0)
        }
        None => FALLBACK_SCORE,
    };
    let potential = round_to_one_decimal(potential);

    debug!(
        "scored ({:.4}, {:.4}): {} nearby, {:?}, potential {:.1}",
        point.lat, point.lng, count, competition, potential
    );

    Ok(SiteScore {
        region: region.map(|r| r.name.clone()),
        nearby_stations: count,
        competition,
        potential,
        region_record: region.cloned(),
    })
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::PlanarDegreeDistance;
    use crate::records::{PowerClass, RecordStore, StationRecord};
    use chrono::NaiveDate;

    fn station(id: &str, lat: f64, lng: f64) -> StationRecord {
        StationRecord {
            id: id.to_string(),
            name: format!("Voltrun - Ankara {}", id),
            region: "Ankara".to_string(),
            operator: "Voltrun".to_string(),
            power_class: PowerClass::Dc50,
            power_kw: 50.0,
            socket_count: 4,
            position: GeoPoint::new(lat, lng),
            utilization: 0.6,
            daily_revenue: 1_200.0,
            installed: NaiveDate::from_ymd_opt(2023, 2, 20).unwrap(),
        }
    }

    fn region(name: &str, lat: f64, lng: f64, potential: f64, traffic: f64) -> RegionRecord {
        RegionRecord {
            name: name.to_string(),
            center: GeoPoint::new(lat, lng),
            population: 5_700_000,
            avg_income: 62_000.0,
            households: 2_100_000,
            traffic_density: traffic,
            ev_ownership: 0.04,
            potential,
        }
    }

    fn index<'a>(
        store: &'a RecordStore,
        strategy: &'a PlanarDegreeDistance,
    ) -> ProximityIndex<'a> {
        ProximityIndex::new(store, strategy, 0.1)
    }

    #[test]
    fn competition_tier_boundaries() {
        assert_eq!(CompetitionTier::from_station_count(0), CompetitionTier::Low);
        assert_eq!(
            CompetitionTier::from_station_count(1),
            CompetitionTier::Medium
        );
        assert_eq!(
            CompetitionTier::from_station_count(2),
            CompetitionTier::Medium
        );
        assert_eq!(
            CompetitionTier::from_station_count(3),
            CompetitionTier::High
        );
        assert_eq!(
            CompetitionTier::from_station_count(12),
            CompetitionTier::High
        );
    }

    #[test]
    fn city_center_with_no_competition() {
        let store = RecordStore::builder()
            .region(region("Ankara", 39.9334, 32.8597, 8.2, 0.75))
            .build()
            .unwrap();
        let strategy = PlanarDegreeDistance;

        let score = score_site(GeoPoint::new(39.9334, 32.8597), &index(&store, &strategy)).unwrap();

        assert_eq!(score.nearby_stations, 0);
        assert_eq!(score.competition, CompetitionTier::Low);
        assert_eq!(score.region.as_deref(), Some("Ankara"));
        // 0.4 * 8.2 + 0.3 * 10 + 0.3 * 7.5 = 8.53 -> 8.5
        assert_eq!(score.potential, 8.5);
        assert_eq!(score.band(), PotentialBand::High);
        assert_eq!(score.region_record.unwrap().name, "Ankara");
    }

    #[test]
    fn nearby_stations_reduce_the_score() {
        let store = RecordStore::builder()
            .region(region("Ankara", 39.9334, 32.8597, 8.2, 0.75))
            .station(station("ST001", 39.94, 32.86))
            .station(station("ST002", 39.92, 32.85))
            .build()
            .unwrap();
        let strategy = PlanarDegreeDistance;

        let score = score_site(GeoPoint::new(39.9334, 32.8597), &index(&store, &strategy)).unwrap();

        assert_eq!(score.nearby_stations, 2);
        assert_eq!(score.competition, CompetitionTier::Medium);
        // 0.4 * 8.2 + 0.3 * 8 + 0.3 * 7.5 = 7.93 -> 7.9
        assert_eq!(score.potential, 7.9);
    }

    #[test]
    fn score_goes_negative_under_heavy_competition() {
        let mut builder = RecordStore::builder().region(region("Ankara", 39.93, 32.86, 0.0, 0.0));
        for i in 0..12 {
            builder = builder.station(station(
                &format!("ST{:03}", i + 1),
                39.93 + (i as f64) * 0.001,
                32.86,
            ));
        }
        let store = builder.build().unwrap();
        let strategy = PlanarDegreeDistance;

        let score = score_site(GeoPoint::new(39.93, 32.86), &index(&store, &strategy)).unwrap();

        assert_eq!(score.nearby_stations, 12);
        // The (10 - c) term is not clamped at zero: 0.3 * (10 - 12) = -0.6.
        assert_eq!(score.potential, -0.6);
        assert_eq!(score.band(), PotentialBand::Low);
    }

    #[test]
    fn no_regions_falls_back_to_neutral_score() {
        let store = RecordStore::builder().build().unwrap();
        let strategy = PlanarDegreeDistance;

        let score = score_site(GeoPoint::new(39.0, 32.0), &index(&store, &strategy)).unwrap();

        assert_eq!(score.region, None);
        assert!(score.region_record.is_none());
        assert_eq!(score.potential, 5.0);
        assert_eq!(score.competition, CompetitionTier::Low);
        assert_eq!(score.band(), PotentialBand::Moderate);
    }

    #[test]
    fn scoring_is_deterministic_across_calls() {
        let store = RecordStore::builder()
            .region(region("Ankara", 39.9334, 32.8597, 8.2, 0.75))
            .station(station("ST001", 39.94, 32.86))
            .build()
            .unwrap();
        let strategy = PlanarDegreeDistance;
        let point = GeoPoint::new(39.93, 32.85);

        let first = score_site(point, &index(&store, &strategy)).unwrap();
        for _ in 0..3 {
            let next = score_site(point, &index(&store, &strategy)).unwrap();
            assert_eq!(next.potential, first.potential);
            assert_eq!(next.region, first.region);
            assert_eq!(next.nearby_stations, first.nearby_stations);
        }
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let store = RecordStore::builder().build().unwrap();
        let strategy = PlanarDegreeDistance;

        let result = score_site(GeoPoint::new(f64::NAN, 32.0), &index(&store, &strategy));

        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn potential_band_thresholds() {
        assert_eq!(PotentialBand::from_score(7.0), PotentialBand::High);
        assert_eq!(PotentialBand::from_score(6.9), PotentialBand::Moderate);
        assert_eq!(PotentialBand::from_score(5.0), PotentialBand::Moderate);
        assert_eq!(PotentialBand::from_score(4.9), PotentialBand::Low);
    }
}
