//! Public API facade for site analysis.
//!
//! `SiteAnalyzerBuilder` provides a fluent API for configuring the analysis
//! surface (radius, projection horizon, distance strategy); the built
//! `SiteAnalyzer` borrows a frozen record store and exposes the two core
//! operations: scoring a candidate site and projecting investment returns.

use crate::constants::{DEFAULT_HORIZON_YEARS, NEARBY_RADIUS};
use crate::error::AnalysisError;
use crate::finance::{FinancialModel, FinancialProjection, InvestmentParameters, Scenario};
use crate::geo::{DistanceStrategy, GeoPoint, PlanarDegreeDistance};
use crate::proximity::ProximityIndex;
use crate::records::RecordStore;
use crate::scoring::{score_site, SiteScore};

/// Fluent configuration for a `SiteAnalyzer`.
pub struct SiteAnalyzerBuilder {
    radius: f64,
    horizon_years: u32,
    strategy: Box<dyn DistanceStrategy>,
}

impl SiteAnalyzerBuilder {
    /// Start from the default configuration: planar-degree distance,
    /// the default nearby radius, and a five-year horizon.
    pub fn new() -> Self {
        SiteAnalyzerBuilder {
            radius: NEARBY_RADIUS,
            horizon_years: DEFAULT_HORIZON_YEARS,
            strategy: Box::new(PlanarDegreeDistance),
        }
    }

    /// Set the nearby radius, in the unit of the configured strategy.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the projection horizon in years.
    pub fn horizon_years(mut self, years: u32) -> Self {
        self.horizon_years = years;
        self
    }

    /// Replace the distance strategy (e.g. with a geodesic implementation).
    pub fn distance_strategy(mut self, strategy: Box<dyn DistanceStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn build(self, store: &RecordStore) -> SiteAnalyzer<'_> {
        SiteAnalyzer {
            store,
            strategy: self.strategy,
            model: FinancialModel::default(),
            radius: self.radius,
            horizon_years: self.horizon_years,
        }
    }
}

impl Default for SiteAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Site scoring and investment projection over one frozen record store.
///
/// Holds no mutable state; concurrent calls on a shared reference are
/// independent.
pub struct SiteAnalyzer<'a> {
    store: &'a RecordStore,
    strategy: Box<dyn DistanceStrategy>,
    model: FinancialModel,
    radius: f64,
    horizon_years: u32,
}

impl<'a> SiteAnalyzer<'a> {
    /// Analyzer with the default configuration.
    pub fn new(store: &'a RecordStore) -> Self {
        SiteAnalyzerBuilder::new().build(store)
    }

    pub fn store(&self) -> &RecordStore {
        self.store
    }

    /// Score a candidate site at `point`.
    pub fn analyze(&self, point: GeoPoint) -> Result<SiteScore, AnalysisError> {
        let index = ProximityIndex::new(self.store, self.strategy.as_ref(), self.radius);
        score_site(point, &index)
    }

    /// Project investment returns over the configured horizon.
    pub fn project(
        &self,
        params: &InvestmentParameters,
    ) -> Result<FinancialProjection, AnalysisError> {
        self.model.project(params, self.horizon_years)
    }

    /// Run the scenario sweep over the configured horizon.
    pub fn scenarios(
        &self,
        params: &InvestmentParameters,
    ) -> Result<Vec<(Scenario, FinancialProjection)>, AnalysisError> {
        self.model.scenario_sweep(params, self.horizon_years)
    }
}
