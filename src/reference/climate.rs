//! Climate zones and postal-code resolution
//!
//! France is split into eight heating-degree-day zones (H1a..H3). The zone
//! drives two adjustments: expected consumption scales with the degree-day
//! ratio against the reference zone, and heat-pump COP degrades in colder
//! zones where outdoor units spend more time defrosting.

use serde::{Deserialize, Serialize};

/// Reference degree-days (zone H2b, base 18 degC)
const REFERENCE_DEGREE_DAYS: f64 = 2300.0;

/// Climate zone identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateZone {
    H1a,
    H1b,
    H1c,
    H2a,
    H2b,
    H2c,
    H2d,
    H3,
}

impl ClimateZone {
    /// Fallback zone when the postal code is malformed or unrecognized
    pub const DEFAULT: ClimateZone = ClimateZone::H2b;

    /// Annual heating degree-days, base 18 degC
    pub fn degree_days(&self) -> f64 {
        match self {
            ClimateZone::H1a => 2900.0,
            ClimateZone::H1b => 3100.0,
            ClimateZone::H1c => 3300.0,
            ClimateZone::H2a => 2400.0,
            ClimateZone::H2b => 2300.0,
            ClimateZone::H2c => 2100.0,
            ClimateZone::H2d => 1900.0,
            ClimateZone::H3 => 1500.0,
        }
    }

    /// Consumption multiplier relative to the reference zone
    pub fn consumption_adjustment(&self) -> f64 {
        self.degree_days() / REFERENCE_DEGREE_DAYS
    }

    /// Seasonal COP multiplier for heat pumps installed in this zone
    pub fn cop_adjustment(&self) -> f64 {
        match self {
            ClimateZone::H1a => 0.88,
            ClimateZone::H1b => 0.85,
            ClimateZone::H1c => 0.82,
            ClimateZone::H2a => 0.95,
            ClimateZone::H2b => 1.0,
            ClimateZone::H2c => 1.02,
            ClimateZone::H2d => 1.05,
            ClimateZone::H3 => 1.10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateZone::H1a => "H1a",
            ClimateZone::H1b => "H1b",
            ClimateZone::H1c => "H1c",
            ClimateZone::H2a => "H2a",
            ClimateZone::H2b => "H2b",
            ClimateZone::H2c => "H2c",
            ClimateZone::H2d => "H2d",
            ClimateZone::H3 => "H3",
        }
    }
}

/// Derive the department code from a postal code
///
/// Corsican codes keep the 2A/2B split (20000-20199 is Corse-du-Sud) and
/// overseas territories use their 3-digit department. Returns None when the
/// postal code is empty, too short, or not numeric.
pub fn department_from_postal(postal_code: &str) -> Option<String> {
    let code = postal_code.trim();
    if code.len() < 2 || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if code.starts_with("97") || code.starts_with("98") {
        // Overseas departments and collectivities carry 3-digit codes
        if code.len() >= 3 {
            return Some(code[..3].to_string());
        }
        return None;
    }

    if code.starts_with("20") {
        // Corsica: 200xx/201xx belong to 2A, 202xx and above to 2B
        return match code.as_bytes().get(2) {
            Some(b'0') | Some(b'1') | None => Some("2A".to_string()),
            Some(_) => Some("2B".to_string()),
        };
    }

    Some(code[..2].to_string())
}

/// Map a department code to its climate zone
///
/// Unknown departments fall back to the default zone.
pub fn zone_for_department(department: &str) -> ClimateZone {
    match department {
        "02" | "08" | "10" | "51" | "52" | "54" | "55" | "57" | "59" | "60" | "62" | "67"
        | "68" | "70" | "75" | "77" | "78" | "80" | "88" | "90" | "91" | "92" | "93" | "94"
        | "95" => ClimateZone::H1a,
        "01" | "03" | "21" | "25" | "28" | "39" | "45" | "58" | "71" | "89" => ClimateZone::H1b,
        "05" | "15" | "23" | "38" | "42" | "43" | "63" | "69" | "73" | "74" => ClimateZone::H1c,
        "14" | "22" | "27" | "29" | "35" | "50" | "53" | "56" | "61" | "72" | "76" => {
            ClimateZone::H2a
        }
        "16" | "17" | "18" | "36" | "37" | "41" | "44" | "49" | "79" | "85" | "86" | "87" => {
            ClimateZone::H2b
        }
        "09" | "12" | "19" | "24" | "31" | "32" | "33" | "40" | "46" | "47" | "64" | "65"
        | "81" | "82" => ClimateZone::H2c,
        "04" | "07" | "26" | "48" | "84" => ClimateZone::H2d,
        "06" | "11" | "13" | "30" | "34" | "66" | "83" | "2A" | "2B" => ClimateZone::H3,
        dept if dept.starts_with("97") || dept.starts_with("98") => ClimateZone::H3,
        _ => ClimateZone::DEFAULT,
    }
}

/// Resolve a postal code straight to its climate zone
pub fn zone_for_postal(postal_code: &str) -> ClimateZone {
    match department_from_postal(postal_code) {
        Some(dept) => zone_for_department(&dept),
        None => ClimateZone::DEFAULT,
    }
}
