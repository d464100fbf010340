//! Investment return model: converts a station specification and operating
//! assumptions into revenue, cost, ROI, payback, and multi-year profit
//! projections, plus pessimistic/realistic/optimistic scenario variants.

use crate::constants::*;
use crate::error::AnalysisError;
use crate::records::PowerClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Demand outcome modeled by a revenue multiplier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Scenario {
    Pessimistic,
    Realistic,
    Optimistic,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::Pessimistic => "pessimistic",
            Scenario::Realistic => "realistic",
            Scenario::Optimistic => "optimistic",
        };
        f.write_str(name)
    }
}

/// Caller-supplied station specification and operating assumptions.
///
/// The three monthly costs are exogenous fixed inputs, not derived from
/// usage.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub power_class: PowerClass,
    pub socket_count: u32,
    pub daily_usage_hours: f64,
    pub price_per_kwh: f64,
    pub monthly_energy_cost: f64,
    pub monthly_maintenance_cost: f64,
    pub monthly_rent: f64,
}

impl InvestmentParameters {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.socket_count < MIN_SOCKETS {
            return Err(AnalysisError::InvalidParameter(format!(
                "socket count {} is below the minimum of {}",
                self.socket_count, MIN_SOCKETS
            )));
        }

        if !(self.daily_usage_hours.is_finite()
            && (0.0..=MAX_USAGE_HOURS).contains(&self.daily_usage_hours))
        {
            return Err(AnalysisError::InvalidParameter(format!(
                "daily usage hours {} outside 0..={}",
                self.daily_usage_hours, MAX_USAGE_HOURS
            )));
        }

        for (label, value) in [
            ("price per kWh", self.price_per_kwh),
            ("monthly energy cost", self.monthly_energy_cost),
            ("monthly maintenance cost", self.monthly_maintenance_cost),
            ("monthly rent", self.monthly_rent),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AnalysisError::InvalidParameter(format!(
                    "{} {} is negative or non-finite",
                    label, value
                )));
            }
        }

        Ok(())
    }

    /// Sum of the three itemized fixed costs.
    pub fn monthly_fixed_cost(&self) -> f64 {
        self.monthly_energy_cost + self.monthly_maintenance_cost + self.monthly_rent
    }
}

/// Cumulative profit at the end of one projection year.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: u32,
    pub cumulative_profit: f64,
}

/// Coarse triage of a projection by its horizon ROI.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum InvestmentRating {
    Strong,
    Moderate,
    Weak,
}

impl InvestmentRating {
    pub fn from_roi(roi_pct: f64) -> Self {
        if roi_pct > 50.0 {
            InvestmentRating::Strong
        } else if roi_pct > 20.0 {
            InvestmentRating::Moderate
        } else {
            InvestmentRating::Weak
        }
    }
}

/// Full projection for one parameter set over a fixed horizon.
///
/// Monetary figures carry full f64 precision; rounding and currency
/// formatting belong to the presentation layer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FinancialProjection {
    pub investment: f64,
    pub monthly_revenue: f64,
    pub monthly_cost: f64,
    pub monthly_profit: f64,
    pub annual_profit: f64,
    /// Return on investment over the horizon, in percent.
    pub roi_pct: f64,
    pub payback_years: f64,
    pub horizon_years: u32,
    /// Cumulative profit per year, for charting. `cumulative_profit` starts
    /// at `annual_profit - investment` for year one.
    pub cumulative: Vec<YearPoint>,
    /// First year whose cumulative profit is non-negative, if it falls
    /// within the horizon.
    pub break_even_year: Option<u32>,
}

impl FinancialProjection {
    pub fn rating(&self) -> InvestmentRating {
        InvestmentRating::from_roi(self.roi_pct)
    }
}

/// The investment return model, parameterized by a power class table.
///
/// Stateless beyond the table: every projection is a pure function of its
/// parameters, recomputed in full on each call.
pub struct FinancialModel {
    power_classes: PowerClassTable,
}

impl FinancialModel {
    pub fn new(power_classes: PowerClassTable) -> Self {
        FinancialModel { power_classes }
    }

    /// Base hardware cost for the class plus the per-socket increment for
    /// every socket beyond the base allowance.
    pub fn investment_cost(
        &self,
        power_class: PowerClass,
        socket_count: u32,
    ) -> Result<f64, AnalysisError> {
        let spec = self.power_classes.get(power_class)?;
        let extra_sockets = socket_count.saturating_sub(BASE_SOCKET_ALLOWANCE);

        Ok(spec.base_cost + extra_sockets as f64 * SOCKET_INCREMENT_COST)
    }

    /// Project returns under the realistic (multiplier 1.0) assumption.
    pub fn project(
        &self,
        params: &InvestmentParameters,
        horizon_years: u32,
    ) -> Result<FinancialProjection, AnalysisError> {
        self.scenario(params, 1.0, horizon_years)
    }

    /// Project returns with `revenue_multiplier` applied to revenue only;
    /// monthly cost is held constant.
    pub fn scenario(
        &self,
        params: &InvestmentParameters,
        revenue_multiplier: f64,
        horizon_years: u32,
    ) -> Result<FinancialProjection, AnalysisError> {
        params.validate()?;

        if !(revenue_multiplier.is_finite() && revenue_multiplier >= 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "revenue multiplier {} is negative or non-finite",
                revenue_multiplier
            )));
        }
        if horizon_years == 0 {
            return Err(AnalysisError::InvalidParameter(
                "projection horizon must cover at least one year".to_string(),
            ));
        }

        let spec = self.power_classes.get(params.power_class)?;
        let investment = self.investment_cost(params.power_class, params.socket_count)?;

        let daily_energy_kwh = spec.rated_kw
            * params.daily_usage_hours
            * params.socket_count as f64
            * CHARGE_EFFICIENCY;
        let daily_revenue = daily_energy_kwh * params.price_per_kwh;
        let monthly_revenue = daily_revenue * DAYS_PER_MONTH * revenue_multiplier;

        let monthly_cost = params.monthly_fixed_cost();
        let monthly_profit = monthly_revenue - monthly_cost;
        let annual_profit = monthly_profit * MONTHS_PER_YEAR;

        if annual_profit <= 0.0 {
            return Err(AnalysisError::DegenerateProjection(format!(
                "annual profit {} leaves payback undefined",
                annual_profit
            )));
        }

        let roi_pct =
            (annual_profit * horizon_years as f64 - investment) / investment * 100.0;
        let payback_years = investment / annual_profit;

        let cumulative: Vec<YearPoint> = (1..=horizon_years)
            .map(|year| YearPoint {
                year,
                cumulative_profit: annual_profit * year as f64 - investment,
            })
            .collect();
        let break_even_year = cumulative
            .iter()
            .find(|point| point.cumulative_profit >= 0.0)
            .map(|point| point.year);

        Ok(FinancialProjection {
            investment,
            monthly_revenue,
            monthly_cost,
            monthly_profit,
            annual_profit,
            roi_pct,
            payback_years,
            horizon_years,
            cumulative,
            break_even_year,
        })
    }

    /// Run the fixed pessimistic/realistic/optimistic sweep, in that order.
    ///
    /// A scenario whose profit turns non-positive fails the whole sweep
    /// with `DegenerateProjection`; callers wanting per-scenario outcomes
    /// can invoke `scenario` individually.
    pub fn scenario_sweep(
        &self,
        params: &InvestmentParameters,
        horizon_years: u32,
    ) -> Result<Vec<(Scenario, FinancialProjection)>, AnalysisError> {
        SCENARIO_MULTIPLIERS
            .iter()
            .map(|&(scenario, multiplier)| {
                self.scenario(params, multiplier, horizon_years)
                    .map(|projection| (scenario, projection))
            })
            .collect()
    }
}

impl Default for FinancialModel {
    fn default() -> Self {
        FinancialModel::new(PowerClassTable::default())
    }
}
