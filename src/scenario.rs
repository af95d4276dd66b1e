//! Sensitivity runner over shifted price scenarios
//!
//! Professionals want the baseline bracketed: what happens to payback if
//! energy prices run hotter or cooler than the derived models. The runner
//! holds the two baseline models and replays the same project under rate
//! shifts.

use serde::Serialize;

use crate::market::evolution::PriceEvolutionModel;
use crate::market::provider::{HistoricalModelProvider, SeriesFetcher};
use crate::project::data::ProjectInput;
use crate::reference::energy::EnergyCarrier;
use crate::simulation::result::SimulationResult;
use crate::simulator::run_with_models;

/// One price scenario: a label and a rate shift in points for each side
#[derive(Debug, Clone)]
pub struct ScenarioSpec {
    pub label: String,

    /// Shift applied to the current carrier's model
    pub current_delta: f64,

    /// Shift applied to the electricity model
    pub electricity_delta: f64,
}

impl ScenarioSpec {
    /// Symmetric shift on both carriers
    pub fn symmetric(label: impl Into<String>, delta: f64) -> Self {
        Self {
            label: label.into(),
            current_delta: delta,
            electricity_delta: delta,
        }
    }
}

/// Headline figures of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub payback_years: Option<f64>,
    pub lifetime_savings: f64,
    pub net_benefit: f64,
    pub annualized_return_pct: Option<f64>,
}

impl ScenarioOutcome {
    fn from_result(label: String, result: &SimulationResult) -> Self {
        Self {
            label,
            payback_years: result.payback_years,
            lifetime_savings: result.lifetime_savings,
            net_benefit: result.net_benefit,
            annualized_return_pct: result.annualized_return_pct,
        }
    }
}

/// Pre-resolved runner for scenario batches
///
/// Resolving the models once up front keeps the batch free of provider
/// traffic; each run is then pure arithmetic and safe to parallelize.
#[derive(Debug, Clone)]
pub struct SensitivityRunner {
    current_model: PriceEvolutionModel,
    electricity_model: PriceEvolutionModel,
}

impl SensitivityRunner {
    pub fn new(
        current_model: PriceEvolutionModel,
        electricity_model: PriceEvolutionModel,
    ) -> Self {
        Self {
            current_model,
            electricity_model,
        }
    }

    /// Resolve the baseline models for a project from a provider
    pub fn from_provider<F: SeriesFetcher>(
        provider: &HistoricalModelProvider<F>,
        input: &ProjectInput,
    ) -> Self {
        Self {
            current_model: provider.model_for(input.heating_type.carrier()),
            electricity_model: provider.model_for(EnergyCarrier::Electricity),
        }
    }

    /// Run one scenario
    pub fn run(&self, input: &ProjectInput, spec: &ScenarioSpec) -> ScenarioOutcome {
        let result = run_with_models(
            input,
            self.current_model.shifted(spec.current_delta),
            self.electricity_model.shifted(spec.electricity_delta),
        );
        ScenarioOutcome::from_result(spec.label.clone(), &result)
    }

    /// Run a batch of scenarios in order
    pub fn run_all(&self, input: &ProjectInput, specs: &[ScenarioSpec]) -> Vec<ScenarioOutcome> {
        specs.iter().map(|spec| self.run(input, spec)).collect()
    }

    /// Default bracket: baseline plus symmetric +/- shifts
    pub fn default_bracket() -> Vec<ScenarioSpec> {
        vec![
            ScenarioSpec::symmetric("pessimistic (-2 pts)", -2.0),
            ScenarioSpec::symmetric("baseline", 0.0),
            ScenarioSpec::symmetric("optimistic (+2 pts)", 2.0),
        ]
    }
}
