//! Heat-pump sizing validation
//!
//! Compares the declared thermal power against a recommendation derived
//! from floor area, insulation quality, build year and climate. Sizing
//! outside the band is an advisory for the installer, never a blocker:
//! the economics still compute.

use serde::{Deserialize, Serialize};

use crate::project::data::InsulationQuality;
use crate::reference::climate::{zone_for_postal, ClimateZone};

/// Weight of the declared insulation quality vs. the build-year heuristic
const INSULATION_WEIGHT: f64 = 0.80;

/// Acceptable band around the recommended power
const BAND_LOW: f64 = 0.90;
const BAND_HIGH: f64 = 1.20;

/// Sizing assessment for a declared unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingAssessment {
    /// Recommended thermal power in kW for the dwelling
    pub recommended_kw: f64,

    /// Lower bound of the acceptable band
    pub min_kw: f64,

    /// Upper bound of the acceptable band
    pub max_kw: f64,

    /// Whether the declared power falls inside the band
    pub is_adequate: bool,

    /// Human-readable advisory for the installer
    pub advisory: String,
}

/// Heating power density in W/m**2 for a declared insulation quality
fn insulation_coefficient(quality: InsulationQuality) -> f64 {
    match quality {
        InsulationQuality::Excellent => 40.0,
        InsulationQuality::Good => 60.0,
        InsulationQuality::Average => 85.0,
        InsulationQuality::Poor => 110.0,
    }
}

/// Heating power density in W/m**2 inferred from the build year
fn build_year_coefficient(build_year: u32) -> f64 {
    if build_year >= 2012 {
        45.0
    } else if build_year >= 2000 {
        65.0
    } else if build_year >= 1975 {
        90.0
    } else {
        120.0
    }
}

/// Validate the declared power against the dwelling's heat demand
///
/// The W/m**2 coefficient blends the declared insulation quality with the
/// build-year heuristic; without a declared quality the build year decides
/// alone. Colder climates scale the recommendation by their degree-day
/// ratio.
pub fn validate_sizing(
    declared_power_kw: f64,
    floor_area_m2: f64,
    build_year: u32,
    insulation: Option<InsulationQuality>,
    postal_code: Option<&str>,
) -> SizingAssessment {
    let year_coef = build_year_coefficient(build_year);
    let coefficient = match insulation {
        Some(quality) => {
            INSULATION_WEIGHT * insulation_coefficient(quality)
                + (1.0 - INSULATION_WEIGHT) * year_coef
        }
        None => year_coef,
    };

    let zone = postal_code.map(zone_for_postal).unwrap_or(ClimateZone::DEFAULT);
    let recommended_kw = coefficient * floor_area_m2 / 1000.0 * zone.consumption_adjustment();

    let min_kw = recommended_kw * BAND_LOW;
    let max_kw = recommended_kw * BAND_HIGH;
    let is_adequate = declared_power_kw >= min_kw && declared_power_kw <= max_kw;

    let advisory = if is_adequate {
        format!(
            "Declared power {:.1} kW sits within the recommended {:.1}-{:.1} kW band.",
            declared_power_kw, min_kw, max_kw
        )
    } else if declared_power_kw < min_kw {
        format!(
            "Declared power {:.1} kW is below the recommended {:.1}-{:.1} kW band; \
             the unit may struggle on the coldest days.",
            declared_power_kw, min_kw, max_kw
        )
    } else {
        format!(
            "Declared power {:.1} kW exceeds the recommended {:.1}-{:.1} kW band; \
             an oversized unit short-cycles and wears faster.",
            declared_power_kw, min_kw, max_kw
        )
    };

    SizingAssessment {
        recommended_kw,
        min_kw,
        max_kw,
        is_adequate,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blended_coefficient() {
        // Average insulation (85) blended with a 1995 build (90):
        // 0.8*85 + 0.2*90 = 86 W/m2, reference zone, 100 m2 -> 8.6 kW
        let assessment = validate_sizing(
            8.6,
            100.0,
            1995,
            Some(InsulationQuality::Average),
            Some("37000"),
        );
        assert!((assessment.recommended_kw - 8.6).abs() < 1e-9);
        assert!(assessment.is_adequate);
    }

    #[test]
    fn test_build_year_alone_without_insulation() {
        // 1960 build: 120 W/m2 on 100 m2 -> 12 kW in the reference zone
        let assessment = validate_sizing(12.0, 100.0, 1960, None, Some("37000"));
        assert!((assessment.recommended_kw - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_climate_scales_recommendation() {
        let mild = validate_sizing(8.0, 100.0, 1995, None, Some("13001"));
        let cold = validate_sizing(8.0, 100.0, 1995, None, Some("25000"));
        assert!(cold.recommended_kw > mild.recommended_kw);
    }

    #[test]
    fn test_out_of_band_is_advisory_not_error() {
        let undersized = validate_sizing(3.0, 100.0, 1960, None, None);
        assert!(!undersized.is_adequate);
        assert!(undersized.advisory.contains("below"));

        let oversized = validate_sizing(25.0, 100.0, 1960, None, None);
        assert!(!oversized.is_adequate);
        assert!(oversized.advisory.contains("exceeds"));
    }
}
