//! Record store: the read-only station and region tables every query runs
//! against.
//!
//! The store follows a load-then-freeze discipline: an ingestion
//! collaborator feeds records through `RecordStoreBuilder`, `build()`
//! validates the full data set, and the frozen `RecordStore` is handed by
//! reference to the analysis entry points. No query ever observes a
//! partially loaded store, and nothing mutates a store after it is built.

use crate::constants::PowerClassTable;
use crate::error::AnalysisError;
use crate::geo::GeoPoint;
use chrono::NaiveDate;
use fnv::FnvHashMap;
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four recognized charger power classes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum PowerClass {
    Ac22,
    Dc50,
    Dc150,
    Dc350,
}

impl PowerClass {
    pub const ALL: [PowerClass; 4] = [
        PowerClass::Ac22,
        PowerClass::Dc50,
        PowerClass::Dc150,
        PowerClass::Dc350,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerClass::Ac22 => "AC 22kW",
            PowerClass::Dc50 => "DC 50kW",
            PowerClass::Dc150 => "DC 150kW",
            PowerClass::Dc350 => "DC 350kW",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, AnalysisError> {
        match label {
            "AC 22kW" => Ok(PowerClass::Ac22),
            "DC 50kW" => Ok(PowerClass::Dc50),
            "DC 150kW" => Ok(PowerClass::Dc150),
            "DC 350kW" => Ok(PowerClass::Dc350),
            other => Err(AnalysisError::InvalidParameter(format!(
                "unrecognized power class '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PowerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One existing charging station, as supplied by the ingestion layer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    pub region: String,
    pub operator: String,
    pub power_class: PowerClass,
    pub power_kw: f64,
    pub socket_count: u32,
    pub position: GeoPoint,
    /// Observed utilization ratio, 0.0..=1.0.
    pub utilization: f64,
    pub daily_revenue: f64,
    pub installed: NaiveDate,
}

/// Demographic baseline for one region.
///
/// `potential` is the precomputed regional baseline (0..=10) fed in by the
/// data source; it is independent of any specific site query and distinct
/// from the per-site score the scorer produces.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub center: GeoPoint,
    pub population: u64,
    pub avg_income: f64,
    pub households: u64,
    /// Traffic density ratio, 0.0..=1.0.
    pub traffic_density: f64,
    /// EV ownership ratio, 0.0..=1.0.
    pub ev_ownership: f64,
    pub potential: f64,
}

/// Accumulates records and validates them into a frozen `RecordStore`.
pub struct RecordStoreBuilder {
    stations: Vec<StationRecord>,
    regions: Vec<RegionRecord>,
}

impl RecordStoreBuilder {
    pub fn new() -> Self {
        RecordStoreBuilder {
            stations: Vec::new(),
            regions: Vec::new(),
        }
    }

    pub fn station(mut self, station: StationRecord) -> Self {
        self.stations.push(station);
        self
    }

    pub fn region(mut self, region: RegionRecord) -> Self {
        self.regions.push(region);
        self
    }

    /// Validate the accumulated records and freeze the store.
    ///
    /// Region order is preserved exactly as inserted; nearest-region ties
    /// resolve to the earliest entry, so insertion order is part of the
    /// store's observable behavior.
    pub fn build(self) -> Result<RecordStore, AnalysisError> {
        let power_classes = PowerClassTable::default();

        let mut region_index = FnvHashMap::default();
        for (index, region) in self.regions.iter().enumerate() {
            validate_region(region)?;
            if region_index.insert(region.name.clone(), index).is_some() {
                return Err(AnalysisError::InvalidInput(format!(
                    "duplicate region record '{}'",
                    region.name
                )));
            }
        }

        let mut station_index = FnvHashMap::default();
        for (index, station) in self.stations.iter().enumerate() {
            validate_station(station, &power_classes)?;
            if !region_index.contains_key(&station.region) {
                return Err(AnalysisError::InvalidInput(format!(
                    "station '{}' references unknown region '{}'",
                    station.id, station.region
                )));
            }
            if station_index.insert(station.id.clone(), index).is_some() {
                return Err(AnalysisError::InvalidInput(format!(
                    "duplicate station record '{}'",
                    station.id
                )));
            }
        }

        info!(
            "record store frozen: {} stations, {} regions",
            self.stations.len(),
            self.regions.len()
        );

        Ok(RecordStore {
            stations: self.stations,
            regions: self.regions,
            region_index,
            station_index,
        })
    }
}

impl Default for RecordStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_station(
    station: &StationRecord,
    power_classes: &PowerClassTable,
) -> Result<(), AnalysisError> {
    if !station.position.is_finite() {
        return Err(AnalysisError::InvalidInput(format!(
            "station '{}' has non-finite coordinates",
            station.id
        )));
    }

    let spec = power_classes.get(station.power_class)?;
    if (station.power_kw - spec.rated_kw).abs() > f64::EPSILON {
        return Err(AnalysisError::InvalidInput(format!(
            "station '{}' rates {} kW but is declared {}",
            station.id, station.power_kw, station.power_class
        )));
    }

    if station.socket_count < crate::constants::MIN_SOCKETS {
        return Err(AnalysisError::InvalidInput(format!(
            "station '{}' has {} sockets, minimum is {}",
            station.id,
            station.socket_count,
            crate::constants::MIN_SOCKETS
        )));
    }

    if !ratio_in_unit_range(station.utilization) {
        return Err(AnalysisError::InvalidInput(format!(
            "station '{}' utilization {} outside 0..=1",
            station.id, station.utilization
        )));
    }

    if !(station.daily_revenue.is_finite() && station.daily_revenue >= 0.0) {
        return Err(AnalysisError::InvalidInput(format!(
            "station '{}' daily revenue {} is negative or non-finite",
            station.id, station.daily_revenue
        )));
    }

    Ok(())
}

fn validate_region(region: &RegionRecord) -> Result<(), AnalysisError> {
    if !region.center.is_finite() {
        return Err(AnalysisError::InvalidInput(format!(
            "region '{}' has non-finite center coordinates",
            region.name
        )));
    }

    if !ratio_in_unit_range(region.traffic_density) {
        return Err(AnalysisError::InvalidInput(format!(
            "region '{}' traffic density {} outside 0..=1",
            region.name, region.traffic_density
        )));
    }

    if !ratio_in_unit_range(region.ev_ownership) {
        return Err(AnalysisError::InvalidInput(format!(
            "region '{}' EV ownership {} outside 0..=1",
            region.name, region.ev_ownership
        )));
    }

    if !(region.potential.is_finite() && (0.0..=10.0).contains(&region.potential)) {
        return Err(AnalysisError::InvalidInput(format!(
            "region '{}' potential {} outside 0..=10",
            region.name, region.potential
        )));
    }

    Ok(())
}

fn ratio_in_unit_range(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Frozen, read-only station and region tables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordStore {
    stations: Vec<StationRecord>,
    regions: Vec<RegionRecord>,
    region_index: FnvHashMap<String, usize>,
    station_index: FnvHashMap<String, usize>,
}

impl RecordStore {
    pub fn builder() -> RecordStoreBuilder {
        RecordStoreBuilder::new()
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    /// Regions in insertion order.
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    pub fn station(&self, id: &str) -> Option<&StationRecord> {
        self.station_index.get(id).map(|&i| &self.stations[i])
    }

    pub fn region(&self, name: &str) -> Option<&RegionRecord> {
        self.region_index.get(name).map(|&i| &self.regions[i])
    }
}
