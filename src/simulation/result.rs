//! Aggregate simulation result

use serde::{Deserialize, Serialize};

use crate::equipment::sizing::SizingAssessment;
use crate::reference::climate::ClimateZone;

use super::dhw::DhwCosts;
use super::engine::YearRecord;
use super::financing::FinancingResult;

/// First-year costs and the monthly figures professionals quote
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearOneCosts {
    pub current_system_cost: f64,
    pub heat_pump_cost: f64,
    pub savings: f64,
    pub monthly_savings: f64,
}

/// The engine's sole output, owned by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Climate zone resolved from the postal code
    pub climate_zone: ClimateZone,

    /// Seasonal COP the projection ran with
    pub adjusted_cop: f64,

    pub year_one: YearOneCosts,

    /// Full year series over the heat pump's lifetime
    pub years: Vec<YearRecord>,

    /// Fractional years to recover the investment; None when unreached
    pub payback_years: Option<f64>,

    /// Calendar year payback completes; None when unreached
    pub payback_calendar_year: Option<i32>,

    pub lifetime_current_cost: f64,
    pub lifetime_heat_pump_cost: f64,

    /// Lifetime savings gross of the investment
    pub lifetime_savings: f64,

    /// Lifetime savings net of the real investment
    pub net_benefit: f64,

    /// Annualized rate of return in %; None when undefined
    pub annualized_return_pct: Option<f64>,

    pub dhw: DhwCosts,
    pub sizing: SizingAssessment,
    pub financing: FinancingResult,
}

impl SimulationResult {
    /// Whether the project recovers its investment within the lifetime
    pub fn is_profitable(&self) -> bool {
        self.payback_years.is_some()
    }
}
