//! Project input records describing one simulation request
//!
//! A `ProjectInput` is built upstream from validated form data and is
//! read-only for the whole simulation. `validate` re-checks the documented
//! invariants for callers that construct inputs by hand.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::energy::HeatingType;

/// Heat emitter type of the hydraulic distribution circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterType {
    /// Underfloor heating loops
    Underfloor,
    /// Fan-coil units
    FanCoil,
    /// Low-temperature radiators
    LowTempRadiator,
    /// High-temperature (cast iron) radiators
    HighTempRadiator,
    /// Mixed or unknown emitters
    Other,
}

/// Heat pump technology category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatPumpCategory {
    /// Air-to-air: no hydraulic circuit
    AirAir,
    /// Air-to-water
    AirWater,
    /// Ground-source (geothermal)
    Ground,
}

impl HeatPumpCategory {
    /// Whether the unit feeds a hydraulic circuit
    ///
    /// Flow-temperature and emitter corrections only make sense when water
    /// carries the heat; air-to-air units blow directly into the rooms.
    pub fn is_hydraulic(&self) -> bool {
        !matches!(self, HeatPumpCategory::AirAir)
    }
}

/// Declared insulation quality of the dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsulationQuality {
    /// Recent construction or full retrofit
    Excellent,
    /// Partial retrofit (walls or roof plus glazing)
    Good,
    /// Original insulation, double glazing
    Average,
    /// Little to no insulation
    Poor,
}

/// How the project is financed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancingMode {
    /// Paid entirely from savings
    Cash,
    /// Fully financed by a consumer loan
    Credit,
    /// Down payment plus a loan on the remainder
    Mixed,
}

/// Loan terms for credit or mixed financing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinancingTerms {
    pub mode: FinancingMode,

    /// Annual nominal rate as a percentage (e.g. 3.5)
    #[serde(default)]
    pub annual_rate_pct: f64,

    /// Loan term in months
    #[serde(default)]
    pub term_months: u32,

    /// Down payment for mixed financing
    #[serde(default)]
    pub down_payment: f64,
}

impl Default for FinancingTerms {
    fn default() -> Self {
        Self {
            mode: FinancingMode::Cash,
            annual_rate_pct: 0.0,
            term_months: 0,
            down_payment: 0.0,
        }
    }
}

/// Technical and cost data of the proposed heat pump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatPumpSpec {
    pub category: HeatPumpCategory,

    /// Rated thermal power in kW
    pub thermal_power_kw: f64,

    /// Manufacturer COP at rating conditions
    pub nominal_cop: f64,

    /// Design flow temperature in degC (hydraulic circuits)
    pub flow_temperature: f64,

    pub emitter: EmitterType,

    /// Expected service life in years
    pub lifetime_years: u32,

    /// Electricity price the heat pump will be billed at, per kWh
    pub electricity_price: f64,

    /// Annual electrical subscription at the upgraded tier
    pub electric_subscription: f64,

    /// Annual maintenance contract
    pub maintenance: f64,
}

/// Domestic hot water configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DhwConfig {
    /// DHW is produced by the current heating system (folded into its bill)
    pub integrated_in_current_system: bool,

    /// The heat pump will take over DHW production
    pub heat_pump_will_manage: bool,

    /// Declared annual DHW consumption in kWh (separate systems)
    #[serde(default)]
    pub consumption_kwh: Option<f64>,

    /// Price per kWh of the separate DHW system
    #[serde(default)]
    pub price_per_kwh: Option<f64>,

    /// Annual maintenance of the separate DHW system
    #[serde(default)]
    pub maintenance: Option<f64>,

    /// Declared COP of the heat pump in DHW mode
    #[serde(default)]
    pub dhw_cop: Option<f64>,
}

/// One fully-populated simulation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    // Current system
    pub heating_type: HeatingType,

    /// Annual consumption in the carrier's billing unit (L, kg, stere, kWh)
    pub annual_consumption: f64,

    /// Price per billing unit
    pub unit_price: f64,

    /// Annual electrical subscription of the current setup
    #[serde(default)]
    pub electric_subscription: f64,

    /// Annual gas subscription, when the current system burns gas
    #[serde(default)]
    pub gas_subscription: f64,

    /// Annual maintenance of the current system
    #[serde(default)]
    pub maintenance: f64,

    // Dwelling
    pub postal_code: String,

    /// Heated floor area in m**2
    pub floor_area_m2: f64,

    pub build_year: u32,

    #[serde(default)]
    pub insulation: Option<InsulationQuality>,

    /// Household size, used for the DHW estimate
    pub occupants: u32,

    // Replacement project
    pub heat_pump: HeatPumpSpec,

    #[serde(default)]
    pub dhw: DhwConfig,

    /// Total installed cost before subsidies
    pub total_cost: f64,

    /// Total subsidies and grants
    #[serde(default)]
    pub subsidies: f64,

    #[serde(default)]
    pub financing: FinancingTerms,
}

/// Invariant violations detectable on a hand-built input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("heat pump lifetime must be within [5, 30] years, got {0}")]
    LifetimeOutOfRange(u32),

    #[error("nominal COP must be within [1, 10], got {0}")]
    CopOutOfRange(f64),
}

impl ProjectInput {
    /// Net project cost after subsidies, floored at zero
    pub fn net_cost(&self) -> f64 {
        (self.total_cost - self.subsidies).max(0.0)
    }

    /// Check the documented invariants
    pub fn validate(&self) -> Result<(), InputError> {
        let non_negative = [
            ("annual_consumption", self.annual_consumption),
            ("unit_price", self.unit_price),
            ("electric_subscription", self.electric_subscription),
            ("gas_subscription", self.gas_subscription),
            ("maintenance", self.maintenance),
            ("total_cost", self.total_cost),
            ("subsidies", self.subsidies),
            ("heat_pump.thermal_power_kw", self.heat_pump.thermal_power_kw),
            ("heat_pump.electricity_price", self.heat_pump.electricity_price),
            (
                "heat_pump.electric_subscription",
                self.heat_pump.electric_subscription,
            ),
            ("heat_pump.maintenance", self.heat_pump.maintenance),
            ("financing.down_payment", self.financing.down_payment),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(InputError::Negative { field, value });
            }
        }

        if !(5..=30).contains(&self.heat_pump.lifetime_years) {
            return Err(InputError::LifetimeOutOfRange(self.heat_pump.lifetime_years));
        }
        if !(1.0..=10.0).contains(&self.heat_pump.nominal_cop) {
            return Err(InputError::CopOutOfRange(self.heat_pump.nominal_cop));
        }

        Ok(())
    }
}
