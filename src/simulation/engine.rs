//! Year-by-year projection over the heat pump's lifetime

use serde::{Deserialize, Serialize};

use crate::market::evolution::PriceEvolutionModel;
use crate::project::data::ProjectInput;

use super::costs;
use super::dhw::DhwCosts;

/// One projected year, 0-indexed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,

    /// Full annual cost of keeping the current system
    pub current_system_cost: f64,

    /// Full annual cost of running the heat pump
    pub heat_pump_cost: f64,

    /// `current_system_cost - heat_pump_cost`
    pub savings: f64,

    /// Running savings net of the year-0 investment
    pub cumulative_savings: f64,
}

/// Projection engine for one replacement project
///
/// Carries the two price models the projection needs: the current system's
/// carrier and electricity for the heat pump. The DHW contribution is added
/// to both sides without evolution.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    current_model: PriceEvolutionModel,
    electricity_model: PriceEvolutionModel,
}

impl ProjectionEngine {
    pub fn new(current_model: PriceEvolutionModel, electricity_model: PriceEvolutionModel) -> Self {
        Self {
            current_model,
            electricity_model,
        }
    }

    /// Build the year series over the declared lifetime
    ///
    /// `real_investment` is deducted from cumulative savings in year 0;
    /// later years carry no further investment.
    pub fn project(
        &self,
        input: &ProjectInput,
        adjusted_cop: f64,
        dhw: &DhwCosts,
        real_investment: f64,
    ) -> Vec<YearRecord> {
        let lifetime = input.heat_pump.lifetime_years;
        let mut records = Vec::with_capacity(lifetime as usize);
        let mut cumulative = 0.0;

        for year in 0..lifetime {
            let current_system_cost =
                costs::current_cost_for_year(input, dhw, &self.current_model, year)
                    + dhw.current_cost;
            let heat_pump_cost = costs::heat_pump_cost_for_year(
                input,
                dhw,
                adjusted_cop,
                &self.electricity_model,
                year,
            ) + dhw.future_cost;

            let savings = current_system_cost - heat_pump_cost;
            let investment = if year == 0 { real_investment } else { 0.0 };
            cumulative += savings - investment;

            records.push(YearRecord {
                year,
                current_system_cost,
                heat_pump_cost,
                savings,
                cumulative_savings: cumulative,
            });
        }

        records
    }
}
