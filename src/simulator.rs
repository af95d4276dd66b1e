//! Orchestration of one complete simulation
//!
//! Composes the climate lookup, COP adjustment, DHW resolution, financing,
//! projection and ROI into a single `SimulationResult`. The simulator does
//! no I/O of its own; the injected provider owns the only external seam.

use crate::equipment::cop::adjusted_cop;
use crate::equipment::sizing::validate_sizing;
use crate::market::evolution::PriceEvolutionModel;
use crate::market::provider::{HistoricalModelProvider, SeriesFetcher};
use crate::project::data::ProjectInput;
use crate::reference::climate::zone_for_postal;
use crate::reference::energy::EnergyCarrier;
use crate::simulation::dhw::resolve_costs;
use crate::simulation::engine::ProjectionEngine;
use crate::simulation::result::{SimulationResult, YearOneCosts};
use crate::simulation::{financing, roi};

/// Run one simulation against explicit price models
///
/// The entry point for callers that already hold their models, and the
/// body shared by the provider-backed simulator and the sensitivity
/// runner.
pub fn run_with_models(
    input: &ProjectInput,
    current_model: PriceEvolutionModel,
    electricity_model: PriceEvolutionModel,
) -> SimulationResult {
    let climate_zone = zone_for_postal(&input.postal_code);

    let cop = adjusted_cop(
        input.heat_pump.nominal_cop,
        input.heat_pump.flow_temperature,
        input.heat_pump.emitter,
        &input.postal_code,
        input.heat_pump.category,
    );

    let sizing = validate_sizing(
        input.heat_pump.thermal_power_kw,
        input.floor_area_m2,
        input.build_year,
        input.insulation,
        Some(&input.postal_code),
    );

    let dhw = resolve_costs(input, cop);
    let financing = financing::compute(&input.financing, input.net_cost());

    let engine = ProjectionEngine::new(current_model, electricity_model);
    let years = engine.project(input, cop, &dhw, financing.real_investment);

    let lifetime_current_cost: f64 = years.iter().map(|y| y.current_system_cost).sum();
    let lifetime_heat_pump_cost: f64 = years.iter().map(|y| y.heat_pump_cost).sum();
    let lifetime_savings = lifetime_current_cost - lifetime_heat_pump_cost;
    let net_benefit = lifetime_savings - financing.real_investment;

    let payback_years = roi::payback_period(&years, financing.real_investment);
    let payback_calendar_year = payback_years.map(roi::payback_calendar_year);
    let annualized_return_pct = roi::annualized_return_rate(
        financing.real_investment,
        net_benefit,
        input.heat_pump.lifetime_years,
    );

    let year_one = years
        .first()
        .map(|first| YearOneCosts {
            current_system_cost: first.current_system_cost,
            heat_pump_cost: first.heat_pump_cost,
            savings: first.savings,
            monthly_savings: first.savings / 12.0,
        })
        .unwrap_or(YearOneCosts {
            current_system_cost: 0.0,
            heat_pump_cost: 0.0,
            savings: 0.0,
            monthly_savings: 0.0,
        });

    SimulationResult {
        climate_zone,
        adjusted_cop: cop,
        year_one,
        years,
        payback_years,
        payback_calendar_year,
        lifetime_current_cost,
        lifetime_heat_pump_cost,
        lifetime_savings,
        net_benefit,
        annualized_return_pct,
        dhw,
        sizing,
        financing,
    }
}

/// Provider-backed simulator
///
/// Owns the cached model provider; every call resolves the two price
/// models (current carrier and electricity) and delegates to the pure
/// pipeline.
pub struct Simulator<F: SeriesFetcher> {
    provider: HistoricalModelProvider<F>,
}

impl<F: SeriesFetcher> Simulator<F> {
    pub fn new(provider: HistoricalModelProvider<F>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &HistoricalModelProvider<F> {
        &self.provider
    }

    /// Run one full simulation
    pub fn run(&self, input: &ProjectInput) -> SimulationResult {
        let current_model = self.provider.model_for(input.heating_type.carrier());
        let electricity_model = self.provider.model_for(EnergyCarrier::Electricity);
        run_with_models(input, current_model, electricity_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::provider::OfflineFetcher;
    use crate::project::data::{
        DhwConfig, EmitterType, FinancingMode, FinancingTerms, HeatPumpCategory, HeatPumpSpec,
    };
    use crate::reference::climate::ClimateZone;
    use crate::reference::energy::HeatingType;

    /// Oil heating, 2000 L at 1.20, replaced by an air/water unit with
    /// nominal COP 5 on underfloor loops in zone H2a
    fn oil_project() -> ProjectInput {
        ProjectInput {
            heating_type: HeatingType::Oil,
            annual_consumption: 2000.0,
            unit_price: 1.20,
            electric_subscription: 0.0,
            gas_subscription: 0.0,
            maintenance: 150.0,
            postal_code: "14000".to_string(),
            floor_area_m2: 120.0,
            build_year: 1995,
            insulation: None,
            occupants: 4,
            heat_pump: HeatPumpSpec {
                category: HeatPumpCategory::AirWater,
                thermal_power_kw: 10.0,
                nominal_cop: 5.0,
                flow_temperature: 35.0,
                emitter: EmitterType::Underfloor,
                lifetime_years: 17,
                electricity_price: 0.25,
                electric_subscription: 180.0,
                maintenance: 180.0,
            },
            dhw: DhwConfig {
                integrated_in_current_system: true,
                heat_pump_will_manage: false,
                ..Default::default()
            },
            total_cost: 12000.0,
            subsidies: 2000.0,
            financing: FinancingTerms::default(),
        }
    }

    fn simulator() -> Simulator<OfflineFetcher> {
        Simulator::new(HistoricalModelProvider::new(OfflineFetcher))
    }

    #[test]
    fn test_end_to_end_oil_replacement() {
        let input = oil_project();
        let result = simulator().run(&input);

        assert_eq!(result.climate_zone, ClimateZone::H2a);

        // Underfloor at 35 degC keeps the rating; zone H2a derates by 0.95
        assert_eq!(result.adjusted_cop, 4.75);

        // 2000 L * 1.20 + 150 maintenance
        assert!((result.year_one.current_system_cost - 2550.0).abs() < 1e-9);

        // Heat-pump electricity draw: 19 920 kWh / 4.75
        let expected_kwh = 19_920.0 / 4.75;
        let expected_variable = expected_kwh * 0.25;
        let expected_hp = expected_variable + 360.0;
        assert!((result.year_one.heat_pump_cost - expected_hp).abs() < 1e-9);

        // 10 000 net investment recovers within the 17-year lifetime
        let payback = result.payback_years.expect("project should be profitable");
        assert!(payback > 0.0 && payback < 17.0);
        assert!(result.payback_calendar_year.is_some());
        assert!(result.annualized_return_pct.unwrap() > 0.0);
        assert_eq!(result.years.len(), 17);
    }

    #[test]
    fn test_unprofitable_project_reports_none() {
        let mut input = oil_project();
        // Tiny consumption: savings can never recover the investment
        input.annual_consumption = 50.0;
        input.maintenance = 0.0;
        let result = simulator().run(&input);

        assert_eq!(result.payback_years, None);
        assert_eq!(result.payback_calendar_year, None);
        assert!(!result.is_profitable());
    }

    #[test]
    fn test_fully_subsidized_project_has_no_return_rate() {
        let mut input = oil_project();
        input.subsidies = input.total_cost;
        let result = simulator().run(&input);

        // Zero investment: payback is immediate, the rate is undefined
        assert_eq!(result.financing.real_investment, 0.0);
        assert_eq!(result.payback_years, Some(1.0));
        assert!(result.annualized_return_pct.is_none());
    }

    #[test]
    fn test_credit_financing_raises_the_bar() {
        let input = oil_project();
        let cash_result = simulator().run(&input);

        let mut credit_input = oil_project();
        credit_input.financing = FinancingTerms {
            mode: FinancingMode::Credit,
            annual_rate_pct: 4.0,
            term_months: 120,
            down_payment: 0.0,
        };
        let credit_result = simulator().run(&credit_input);

        assert!(
            credit_result.financing.real_investment > cash_result.financing.real_investment
        );
        // Interest pushes payback out
        assert!(credit_result.payback_years >= cash_result.payback_years);
    }
}
