//! Aggregate statistics over the station network: whole-network totals plus
//! per-operator and per-region breakdowns.

use crate::records::{RecordStore, StationRecord};
use fnv::FnvHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Summary metrics for one group of stations.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GroupSummary {
    pub stations: usize,
    pub total_sockets: u32,
    pub avg_power_kw: f64,
    pub avg_utilization: f64,
    pub avg_daily_revenue: f64,
}

fn summarize(stations: &[&StationRecord]) -> GroupSummary {
    let count = stations.len();
    let total_sockets = stations.iter().map(|s| s.socket_count).sum();
    let mean = |f: fn(&StationRecord) -> f64| -> f64 {
        stations.iter().map(|s| f(s)).sum::<f64>() / count as f64
    };

    GroupSummary {
        stations: count,
        total_sockets,
        avg_power_kw: mean(|s| s.power_kw),
        avg_utilization: mean(|s| s.utilization),
        avg_daily_revenue: mean(|s| s.daily_revenue),
    }
}

/// Whole-network summary, or `None` for a store with no stations
/// (the means would be meaningless).
pub fn network_summary(store: &RecordStore) -> Option<GroupSummary> {
    if store.stations().is_empty() {
        return None;
    }

    let all: Vec<&StationRecord> = store.stations().iter().collect();
    Some(summarize(&all))
}

/// Per-operator summaries, largest operator first (ties by name, so the
/// order is stable).
pub fn operator_summaries(store: &RecordStore) -> Vec<(String, GroupSummary)> {
    grouped_summaries(store, |station| &station.operator)
}

/// Per-region summaries, largest region first (ties by name).
pub fn region_summaries(store: &RecordStore) -> Vec<(String, GroupSummary)> {
    grouped_summaries(store, |station| &station.region)
}

fn grouped_summaries(
    store: &RecordStore,
    key: fn(&StationRecord) -> &String,
) -> Vec<(String, GroupSummary)> {
    let mut groups: FnvHashMap<&str, Vec<&StationRecord>> = FnvHashMap::default();
    for station in store.stations() {
        groups.entry(key(station)).or_default().push(station);
    }

    groups
        .into_iter()
        .map(|(name, stations)| (name.to_string(), summarize(&stations)))
        .sorted_by(|a, b| {
            b.1.stations
                .cmp(&a.1.stations)
                .then_with(|| a.0.cmp(&b.0))
        })
        .collect()
}
