//! Annual cost calculators for the current system and the heat pump
//!
//! The one numeric rule everything downstream depends on: price evolution
//! applies to the variable (energy) portion only. Subscriptions and
//! maintenance are held constant in real terms across the horizon.

use crate::market::evolution::PriceEvolutionModel;
use crate::project::data::ProjectInput;

use super::dhw::{DhwCosts, DhwScenario};

/// Heating consumption in billing units, net of any DHW carve-out
///
/// When DHW is folded into the bill today and the heat pump takes it over,
/// the estimated DHW share leaves the heating load so it is not counted
/// twice; the DHW branch prices it separately on both sides.
pub fn heating_consumption_units(input: &ProjectInput, dhw: &DhwCosts) -> f64 {
    if dhw.scenario == DhwScenario::IntegratedTransferred {
        let dhw_units = dhw.consumption_kwh / input.heating_type.kwh_per_unit();
        (input.annual_consumption - dhw_units).max(0.0)
    } else {
        input.annual_consumption
    }
}

/// Annual energy cost of the current system at today's prices
pub fn current_variable_cost(input: &ProjectInput, dhw: &DhwCosts) -> f64 {
    heating_consumption_units(input, dhw) * input.unit_price
}

/// Annual fixed costs of the current system
///
/// The electrical subscription counts only for electric-based systems, the
/// gas subscription only for gas; maintenance as declared.
pub fn current_fixed_costs(input: &ProjectInput) -> f64 {
    let mut fixed = input.maintenance;
    if input.heating_type.is_electric_based() {
        fixed += input.electric_subscription;
    }
    if input.heating_type.is_gas_based() {
        fixed += input.gas_subscription;
    }
    fixed
}

/// Heat delivered by the current system that the heat pump must replace, kWh
pub fn required_thermal_kwh(input: &ProjectInput, dhw: &DhwCosts) -> f64 {
    input
        .heating_type
        .thermal_kwh(heating_consumption_units(input, dhw))
}

/// Annual electricity cost of the heat pump at today's prices
pub fn heat_pump_variable_cost(input: &ProjectInput, dhw: &DhwCosts, adjusted_cop: f64) -> f64 {
    if adjusted_cop <= 0.0 {
        return 0.0;
    }
    required_thermal_kwh(input, dhw) / adjusted_cop * input.heat_pump.electricity_price
}

/// Annual fixed costs of the heat pump: upgraded electrical tier plus its
/// maintenance contract. A heat pump never carries a gas subscription.
pub fn heat_pump_fixed_costs(input: &ProjectInput) -> f64 {
    input.heat_pump.electric_subscription + input.heat_pump.maintenance
}

/// Current-system cost in projection year `year` (0-indexed)
pub fn current_cost_for_year(
    input: &ProjectInput,
    dhw: &DhwCosts,
    model: &PriceEvolutionModel,
    year: u32,
) -> f64 {
    current_variable_cost(input, dhw) * model.cumulative_factor(year) + current_fixed_costs(input)
}

/// Heat-pump cost in projection year `year` (0-indexed)
pub fn heat_pump_cost_for_year(
    input: &ProjectInput,
    dhw: &DhwCosts,
    adjusted_cop: f64,
    electricity_model: &PriceEvolutionModel,
    year: u32,
) -> f64 {
    heat_pump_variable_cost(input, dhw, adjusted_cop) * electricity_model.cumulative_factor(year)
        + heat_pump_fixed_costs(input)
}
