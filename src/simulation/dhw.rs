//! Domestic hot water scenario resolution
//!
//! Two booleans select one of four mutually exclusive scenarios: whether
//! DHW is currently produced by the heating system, and whether the heat
//! pump will take it over. Each scenario yields the same result shape so
//! the projection can fold it in uniformly.

use serde::{Deserialize, Serialize};

use crate::project::data::ProjectInput;

/// Annual DHW need per occupant in kWh (ADEME heuristic)
pub const DHW_KWH_PER_OCCUPANT: f64 = 800.0;

/// COP derate for DHW production, which needs hotter water than space heating
pub const DHW_COP_DERATE: f64 = 0.85;

/// Cap on the estimated DHW share of total consumption; beyond it the
/// estimate falls back to a 80/20 heating/DHW split
const ESTIMATE_SHARE_CAP: f64 = 0.80;

/// DHW share assigned when the occupant estimate crowds out the heating load
const FALLBACK_DHW_SHARE: f64 = 0.20;

/// The four DHW scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhwScenario {
    /// DHW stays folded into the current system's bill; the heat pump
    /// inherits the whole load unchanged
    IntegratedRetained,

    /// DHW is folded in today and the heat pump takes it over; its need
    /// must be estimated and carved out of the heating load
    IntegratedTransferred,

    /// A separate DHW system exists and is kept as-is
    SeparateRetained,

    /// A separate DHW system exists and the heat pump replaces it
    SeparateTransferred,
}

impl DhwScenario {
    /// Select the scenario from the two input flags
    pub fn resolve(integrated_in_current: bool, heat_pump_will_manage: bool) -> Self {
        match (integrated_in_current, heat_pump_will_manage) {
            (true, false) => DhwScenario::IntegratedRetained,
            (true, true) => DhwScenario::IntegratedTransferred,
            (false, false) => DhwScenario::SeparateRetained,
            (false, true) => DhwScenario::SeparateTransferred,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DhwScenario::IntegratedRetained => "integrated-retained",
            DhwScenario::IntegratedTransferred => "integrated-transferred",
            DhwScenario::SeparateRetained => "separate-retained",
            DhwScenario::SeparateTransferred => "separate-transferred",
        }
    }
}

/// Uniform DHW cost contribution, added to both sides of the projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DhwCosts {
    pub scenario: DhwScenario,

    /// Annual DHW cost under the current setup
    pub current_cost: f64,

    /// Annual DHW cost once the project is done
    pub future_cost: f64,

    /// `current_cost - future_cost`
    pub annual_savings: f64,

    /// Annual DHW energy need in kWh (0 when folded into heating)
    pub consumption_kwh: f64,

    /// Whether the need was estimated rather than declared
    pub is_estimated: bool,
}

impl DhwCosts {
    fn zero(scenario: DhwScenario) -> Self {
        Self {
            scenario,
            current_cost: 0.0,
            future_cost: 0.0,
            annual_savings: 0.0,
            consumption_kwh: 0.0,
            is_estimated: false,
        }
    }
}

/// COP applicable to DHW production
///
/// A declared DHW COP wins; otherwise the space-heating COP is derated for
/// the higher storage temperature.
fn dhw_cop(input: &ProjectInput, adjusted_cop: f64) -> f64 {
    input.dhw.dhw_cop.unwrap_or(adjusted_cop * DHW_COP_DERATE)
}

/// Estimated DHW need in kWh for the integrated-transferred scenario
///
/// Occupant heuristic first; when the estimate crowds out the heating load
/// it falls back to a 20 % share of total consumption. The result never
/// exceeds the total.
pub fn estimated_need_kwh(occupants: u32, total_kwh: f64) -> f64 {
    let estimate = occupants as f64 * DHW_KWH_PER_OCCUPANT;
    if estimate > total_kwh * ESTIMATE_SHARE_CAP {
        return (total_kwh * FALLBACK_DHW_SHARE).max(0.0);
    }
    estimate.min(total_kwh).max(0.0)
}

/// Resolve the DHW scenario and its annual cost contribution
pub fn resolve_costs(input: &ProjectInput, adjusted_cop: f64) -> DhwCosts {
    let scenario = DhwScenario::resolve(
        input.dhw.integrated_in_current_system,
        input.dhw.heat_pump_will_manage,
    );

    match scenario {
        // Folded into the heating cost on both sides; contributes nothing
        DhwScenario::IntegratedRetained => DhwCosts::zero(scenario),

        DhwScenario::IntegratedTransferred => {
            let total_kwh = input.heating_type.thermal_kwh(input.annual_consumption);
            let need_kwh = estimated_need_kwh(input.occupants, total_kwh);

            // Price the estimated need at the current carrier's unit price
            let need_units = need_kwh / input.heating_type.kwh_per_unit();
            let current_cost = need_units * input.unit_price;
            let future_cost =
                need_kwh / dhw_cop(input, adjusted_cop) * input.heat_pump.electricity_price;

            DhwCosts {
                scenario,
                current_cost,
                future_cost,
                annual_savings: current_cost - future_cost,
                consumption_kwh: need_kwh,
                is_estimated: true,
            }
        }

        DhwScenario::SeparateRetained => {
            let consumption = input.dhw.consumption_kwh.unwrap_or(0.0);
            let price = input.dhw.price_per_kwh.unwrap_or(0.0);
            let maintenance = input.dhw.maintenance.unwrap_or(0.0);
            let cost = consumption * price + maintenance;
            DhwCosts {
                scenario,
                current_cost: cost,
                future_cost: cost,
                annual_savings: 0.0,
                consumption_kwh: consumption,
                is_estimated: false,
            }
        }

        DhwScenario::SeparateTransferred => {
            let consumption = input.dhw.consumption_kwh.unwrap_or(0.0);
            let price = input.dhw.price_per_kwh.unwrap_or(0.0);
            let maintenance = input.dhw.maintenance.unwrap_or(0.0);
            let current_cost = consumption * price + maintenance;
            // Separate maintenance disappears: the heat-pump contract
            // covers DHW production
            let future_cost =
                consumption / dhw_cop(input, adjusted_cop) * input.heat_pump.electricity_price;
            DhwCosts {
                scenario,
                current_cost,
                future_cost,
                annual_savings: current_cost - future_cost,
                consumption_kwh: consumption,
                is_estimated: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::data::{
        DhwConfig, EmitterType, FinancingTerms, HeatPumpCategory, HeatPumpSpec,
    };
    use crate::reference::energy::HeatingType;

    fn base_input(dhw: DhwConfig) -> ProjectInput {
        ProjectInput {
            heating_type: HeatingType::Oil,
            annual_consumption: 2000.0,
            unit_price: 1.20,
            electric_subscription: 0.0,
            gas_subscription: 0.0,
            maintenance: 150.0,
            postal_code: "37000".to_string(),
            floor_area_m2: 120.0,
            build_year: 1995,
            insulation: None,
            occupants: 4,
            heat_pump: HeatPumpSpec {
                category: HeatPumpCategory::AirWater,
                thermal_power_kw: 10.0,
                nominal_cop: 4.0,
                flow_temperature: 35.0,
                emitter: EmitterType::Underfloor,
                lifetime_years: 17,
                electricity_price: 0.25,
                electric_subscription: 180.0,
                maintenance: 180.0,
            },
            dhw,
            total_cost: 12000.0,
            subsidies: 2000.0,
            financing: FinancingTerms::default(),
        }
    }

    #[test]
    fn test_scenario_selection() {
        assert_eq!(
            DhwScenario::resolve(true, false),
            DhwScenario::IntegratedRetained
        );
        assert_eq!(
            DhwScenario::resolve(true, true),
            DhwScenario::IntegratedTransferred
        );
        assert_eq!(
            DhwScenario::resolve(false, false),
            DhwScenario::SeparateRetained
        );
        assert_eq!(
            DhwScenario::resolve(false, true),
            DhwScenario::SeparateTransferred
        );
    }

    #[test]
    fn test_integrated_retained_contributes_nothing() {
        let input = base_input(DhwConfig {
            integrated_in_current_system: true,
            heat_pump_will_manage: false,
            ..Default::default()
        });
        let costs = resolve_costs(&input, 4.0);
        assert_eq!(costs.annual_savings, 0.0);
        assert_eq!(costs.current_cost, 0.0);
        assert_eq!(costs.future_cost, 0.0);
    }

    #[test]
    fn test_separate_retained_is_cost_neutral() {
        let input = base_input(DhwConfig {
            integrated_in_current_system: false,
            heat_pump_will_manage: false,
            consumption_kwh: Some(2500.0),
            price_per_kwh: Some(0.20),
            maintenance: Some(50.0),
            ..Default::default()
        });
        let costs = resolve_costs(&input, 4.0);
        assert_eq!(costs.current_cost, 550.0);
        assert_eq!(costs.future_cost, 550.0);
        assert_eq!(costs.annual_savings, 0.0);
        assert!(!costs.is_estimated);
    }

    #[test]
    fn test_integrated_transferred_estimates_from_occupants() {
        let input = base_input(DhwConfig {
            integrated_in_current_system: true,
            heat_pump_will_manage: true,
            ..Default::default()
        });
        let costs = resolve_costs(&input, 4.0);

        // 4 occupants * 800 kWh, well below total (19 920 kWh)
        assert_eq!(costs.consumption_kwh, 3200.0);
        assert!(costs.is_estimated);

        // Priced back in litres of oil: 3200 / 9.96 * 1.20
        let expected_current = 3200.0 / 9.96 * 1.20;
        assert!((costs.current_cost - expected_current).abs() < 1e-9);

        // Future side runs at the derated COP: 3200 / (4.0 * 0.85) * 0.25
        let expected_future = 3200.0 / 3.4 * 0.25;
        assert!((costs.future_cost - expected_future).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_falls_back_to_split_share() {
        // 10 occupants -> 8000 kWh against a 4980 kWh total
        assert_eq!(estimated_need_kwh(10, 4980.0), 4980.0 * 0.2);
        // Estimate never exceeds total, even degenerate totals
        assert_eq!(estimated_need_kwh(10, 0.0), 0.0);
    }

    #[test]
    fn test_declared_dhw_cop_wins_over_derate() {
        let input = base_input(DhwConfig {
            integrated_in_current_system: false,
            heat_pump_will_manage: true,
            consumption_kwh: Some(3000.0),
            price_per_kwh: Some(0.20),
            maintenance: Some(60.0),
            dhw_cop: Some(2.5),
        });
        let costs = resolve_costs(&input, 4.0);
        let expected_future = 3000.0 / 2.5 * 0.25;
        assert!((costs.future_cost - expected_future).abs() < 1e-9);
        // Separate maintenance is folded into the heat-pump contract
        assert!((costs.current_cost - (600.0 + 60.0)).abs() < 1e-9);
    }
}
