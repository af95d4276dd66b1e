//! Energy carriers and kWh-equivalent conversion factors

use serde::{Deserialize, Serialize};

/// Energy carrier billed to the household
///
/// Price-evolution models are keyed by carrier; several heating types
/// share one carrier (all heat-pump variants run on electricity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyCarrier {
    Electricity,
    Gas,
    Oil,
    Lpg,
    Pellets,
    Wood,
}

impl EnergyCarrier {
    pub const ALL: [EnergyCarrier; 6] = [
        EnergyCarrier::Electricity,
        EnergyCarrier::Gas,
        EnergyCarrier::Oil,
        EnergyCarrier::Lpg,
        EnergyCarrier::Pellets,
        EnergyCarrier::Wood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyCarrier::Electricity => "electricity",
            EnergyCarrier::Gas => "gas",
            EnergyCarrier::Oil => "oil",
            EnergyCarrier::Lpg => "lpg",
            EnergyCarrier::Pellets => "pellets",
            EnergyCarrier::Wood => "wood",
        }
    }
}

/// Current heating system of the dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatingType {
    Oil,
    Gas,
    Lpg,
    Pellets,
    Wood,
    Electric,
    /// Existing air-to-air heat pump
    HeatPumpAirAir,
    /// Existing air-to-water heat pump
    HeatPumpAirWater,
    /// Existing ground-source heat pump
    HeatPumpGround,
}

impl HeatingType {
    /// Carrier the current system is billed on
    pub fn carrier(&self) -> EnergyCarrier {
        match self {
            HeatingType::Oil => EnergyCarrier::Oil,
            HeatingType::Gas => EnergyCarrier::Gas,
            HeatingType::Lpg => EnergyCarrier::Lpg,
            HeatingType::Pellets => EnergyCarrier::Pellets,
            HeatingType::Wood => EnergyCarrier::Wood,
            HeatingType::Electric
            | HeatingType::HeatPumpAirAir
            | HeatingType::HeatPumpAirWater
            | HeatingType::HeatPumpGround => EnergyCarrier::Electricity,
        }
    }

    /// kWh delivered per billed unit (L, kg, stere or kWh)
    ///
    /// Gas and electricity are billed directly in kWh. Wood is billed by
    /// the stere; a stere of seasoned hardwood yields roughly 1800 kWh.
    pub fn kwh_per_unit(&self) -> f64 {
        match self {
            HeatingType::Oil => 9.96,
            HeatingType::Lpg => 12.8,
            HeatingType::Pellets => 4.6,
            HeatingType::Wood => 1800.0,
            HeatingType::Gas
            | HeatingType::Electric
            | HeatingType::HeatPumpAirAir
            | HeatingType::HeatPumpAirWater
            | HeatingType::HeatPumpGround => 1.0,
        }
    }

    /// Whether the system draws on an electrical subscription
    pub fn is_electric_based(&self) -> bool {
        matches!(self.carrier(), EnergyCarrier::Electricity)
    }

    /// Whether the system draws on a gas subscription
    pub fn is_gas_based(&self) -> bool {
        matches!(self.carrier(), EnergyCarrier::Gas)
    }

    /// Delivered heat in kWh for a billed consumption in carrier units
    ///
    /// Electric resistance heating converts at COP 1, so its billed kWh
    /// already equal the delivered heat.
    pub fn thermal_kwh(&self, consumption_units: f64) -> f64 {
        consumption_units * self.kwh_per_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_mapping() {
        assert_eq!(HeatingType::Oil.carrier(), EnergyCarrier::Oil);
        assert_eq!(HeatingType::Electric.carrier(), EnergyCarrier::Electricity);
        assert_eq!(
            HeatingType::HeatPumpAirWater.carrier(),
            EnergyCarrier::Electricity
        );
    }

    #[test]
    fn test_thermal_kwh() {
        // 2000 L of oil at 9.96 kWh/L
        let kwh = HeatingType::Oil.thermal_kwh(2000.0);
        assert!((kwh - 19920.0).abs() < 1e-9);

        // Gas is already billed in kWh
        assert_eq!(HeatingType::Gas.thermal_kwh(15000.0), 15000.0);
    }

    #[test]
    fn test_subscription_flags() {
        assert!(HeatingType::Electric.is_electric_based());
        assert!(HeatingType::HeatPumpAirAir.is_electric_based());
        assert!(!HeatingType::Oil.is_electric_based());
        assert!(HeatingType::Gas.is_gas_based());
        assert!(!HeatingType::Pellets.is_gas_based());
    }
}
