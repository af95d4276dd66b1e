//! Seasonal COP adjustment
//!
//! The manufacturer's nominal COP is rated at ideal conditions. Real-world
//! performance degrades with the flow temperature the emitters demand, the
//! emitter type itself, and the climate the outdoor unit operates in. For
//! air-to-air units there is no hydraulic circuit, so only the climate
//! correction applies.

use crate::project::data::{EmitterType, HeatPumpCategory};
use crate::reference::climate::zone_for_postal;

/// Degradation from the design flow temperature, hydraulic circuits only
///
/// Underfloor loops run at 35 degC or below and keep the full rating; cast
/// iron radiators pushing past 60 degC cost a third of it.
pub fn temperature_factor(flow_temperature: f64) -> f64 {
    if flow_temperature <= 35.0 {
        1.0
    } else if flow_temperature <= 40.0 {
        0.95
    } else if flow_temperature <= 45.0 {
        0.90
    } else if flow_temperature <= 50.0 {
        0.85
    } else if flow_temperature <= 55.0 {
        0.78
    } else if flow_temperature <= 60.0 {
        0.72
    } else {
        0.65
    }
}

/// Fixed multiplier per emitter type, hydraulic circuits only
pub fn emitter_factor(emitter: EmitterType) -> f64 {
    match emitter {
        EmitterType::Underfloor => 1.0,
        EmitterType::FanCoil => 0.95,
        EmitterType::LowTempRadiator => 0.90,
        EmitterType::HighTempRadiator => 0.70,
        EmitterType::Other => 0.85,
    }
}

/// Seasonal COP adjusted for flow temperature, emitters and climate
///
/// Result is rounded to 2 decimals. Inputs are assumed to be within the
/// validated ranges; there is no error path.
pub fn adjusted_cop(
    nominal_cop: f64,
    flow_temperature: f64,
    emitter: EmitterType,
    postal_code: &str,
    category: HeatPumpCategory,
) -> f64 {
    let (temp_factor, emit_factor) = if category.is_hydraulic() {
        (temperature_factor(flow_temperature), emitter_factor(emitter))
    } else {
        (1.0, 1.0)
    };
    let climate_factor = zone_for_postal(postal_code).cop_adjustment();

    let adjusted = nominal_cop * temp_factor * emit_factor * climate_factor;
    (adjusted * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_bands() {
        assert_eq!(temperature_factor(30.0), 1.0);
        assert_eq!(temperature_factor(35.0), 1.0);
        assert_eq!(temperature_factor(36.0), 0.95);
        assert_eq!(temperature_factor(45.0), 0.90);
        assert_eq!(temperature_factor(55.0), 0.78);
        assert_eq!(temperature_factor(60.0), 0.72);
        assert_eq!(temperature_factor(65.0), 0.65);
    }

    #[test]
    fn test_adjusted_cop_underfloor_reference_zone() {
        // Reference zone, underfloor at 35 degC: only rounding applies
        let cop = adjusted_cop(4.5, 35.0, EmitterType::Underfloor, "37000", HeatPumpCategory::AirWater);
        assert_eq!(cop, 4.5);
    }

    #[test]
    fn test_adjusted_cop_high_temp_radiators() {
        // 4.0 * 0.72 (58 degC) * 0.70 (cast iron) * 1.0 (H2b) = 2.016 -> 2.02
        let cop = adjusted_cop(4.0, 58.0, EmitterType::HighTempRadiator, "37000", HeatPumpCategory::AirWater);
        assert_eq!(cop, 2.02);
    }

    #[test]
    fn test_air_to_air_ignores_hydraulic_factors() {
        // Flow temperature and emitter must not matter without a circuit
        let a = adjusted_cop(4.0, 65.0, EmitterType::HighTempRadiator, "14000", HeatPumpCategory::AirAir);
        let b = adjusted_cop(4.0, 35.0, EmitterType::Underfloor, "14000", HeatPumpCategory::AirAir);
        assert_eq!(a, b);
        // 4.0 * 0.95 (H2a)
        assert_eq!(a, 3.8);
    }

    #[test]
    fn test_climate_factor_applies_to_all_categories() {
        let cold = adjusted_cop(5.0, 35.0, EmitterType::Underfloor, "25000", HeatPumpCategory::AirWater);
        let mild = adjusted_cop(5.0, 35.0, EmitterType::Underfloor, "13001", HeatPumpCategory::AirWater);
        assert!(cold < mild);
    }
}
