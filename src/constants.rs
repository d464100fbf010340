//! Fixed tables and tuning constants consulted by the analysis pipeline.
//!
//! The tables are plain data rather than match arms so they can be
//! inspected, replaced, and tested independently of the algorithms that
//! consult them.

use crate::error::AnalysisError;
use crate::finance::Scenario;
use crate::records::PowerClass;
use fnv::FnvHashMap;

/// Radius within which an existing station counts as competition,
/// in the unit of the configured distance strategy. The default planar
/// strategy makes this ~10 km at the reference latitude.
pub const NEARBY_RADIUS: f64 = 0.1;

/// Fraction of nominal throughput a socket actually delivers.
pub const CHARGE_EFFICIENCY: f64 = 0.7;

/// Fixed 30-day month convention used by all revenue projections.
pub const DAYS_PER_MONTH: f64 = 30.0;

pub const MONTHS_PER_YEAR: f64 = 12.0;

pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Sockets included in the base investment for every power class.
pub const BASE_SOCKET_ALLOWANCE: u32 = 2;

/// Incremental hardware cost per socket beyond the base allowance.
pub const SOCKET_INCREMENT_COST: f64 = 25_000.0;

pub const MIN_SOCKETS: u32 = 2;
pub const MAX_USAGE_HOURS: f64 = 24.0;

/// Revenue multipliers for the scenario sweep, in sweep order.
pub const SCENARIO_MULTIPLIERS: [(Scenario, f64); 3] = [
    (Scenario::Pessimistic, 0.7),
    (Scenario::Realistic, 1.0),
    (Scenario::Optimistic, 1.3),
];

/// Rated output and base hardware investment for one power class.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PowerClassSpec {
    pub rated_kw: f64,
    pub base_cost: f64,
}

/// Immutable power class -> spec table.
///
/// The default table carries the four recognized classes; a miss on lookup
/// is an `InvalidParameter` rather than a panic so that custom tables can
/// be narrower than the default.
pub struct PowerClassTable {
    specs: FnvHashMap<PowerClass, PowerClassSpec>,
}

impl PowerClassTable {
    pub fn empty() -> Self {
        PowerClassTable {
            specs: FnvHashMap::default(),
        }
    }

    pub fn insert(&mut self, class: PowerClass, spec: PowerClassSpec) {
        self.specs.insert(class, spec);
    }

    pub fn get(&self, class: PowerClass) -> Result<PowerClassSpec, AnalysisError> {
        self.specs.get(&class).copied().ok_or_else(|| {
            AnalysisError::InvalidParameter(format!("unrecognized power class {}", class))
        })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for PowerClassTable {
    fn default() -> Self {
        let mut table = PowerClassTable::empty();
        table.insert(
            PowerClass::Ac22,
            PowerClassSpec {
                rated_kw: 22.0,
                base_cost: 50_000.0,
            },
        );
        table.insert(
            PowerClass::Dc50,
            PowerClassSpec {
                rated_kw: 50.0,
                base_cost: 150_000.0,
            },
        );
        table.insert(
            PowerClass::Dc150,
            PowerClassSpec {
                rated_kw: 150.0,
                base_cost: 300_000.0,
            },
        );
        table.insert(
            PowerClass::Dc350,
            PowerClassSpec {
                rated_kw: 350.0,
                base_cost: 500_000.0,
            },
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_all_power_classes() {
        let table = PowerClassTable::default();

        assert_eq!(table.len(), PowerClass::ALL.len());
        for class in PowerClass::ALL {
            assert!(table.get(class).is_ok());
        }
    }

    #[test]
    fn default_table_values() {
        let table = PowerClassTable::default();

        let spec = table.get(PowerClass::Dc50).unwrap();
        assert_eq!(spec.rated_kw, 50.0);
        assert_eq!(spec.base_cost, 150_000.0);

        let spec = table.get(PowerClass::Dc350).unwrap();
        assert_eq!(spec.rated_kw, 350.0);
        assert_eq!(spec.base_cost, 500_000.0);
    }

    #[test]
    fn missing_class_is_invalid_parameter() {
        let table = PowerClassTable::empty();

        match table.get(PowerClass::Ac22) {
            Err(AnalysisError::InvalidParameter(_)) => {}
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn scenario_multipliers_are_ordered() {
        let multipliers: Vec<f64> = SCENARIO_MULTIPLIERS.iter().map(|(_, m)| *m).collect();

        assert_eq!(multipliers, vec![0.7, 1.0, 1.3]);
        assert_eq!(SCENARIO_MULTIPLIERS[1].0, Scenario::Realistic);
    }
}
