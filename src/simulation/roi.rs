//! Payback and rate-of-return calculations
//!
//! Unreached payback is a business outcome, not an error: every function
//! here returns an Option and the caller renders "not recovered within the
//! lifetime" accordingly.

use chrono::{Datelike, Utc};

use super::engine::YearRecord;

/// Payback period in years, interpolated within the crossing year
///
/// Cumulative savings are taken gross of the investment. A crossing in the
/// very first year pins the period to exactly 1 year. Returns None when the
/// investment is never recovered within the series, and rounds to 1 decimal.
pub fn payback_period(records: &[YearRecord], investment: f64) -> Option<f64> {
    let mut cumulative = 0.0;
    for (i, record) in records.iter().enumerate() {
        let before = cumulative;
        cumulative += record.savings;
        if cumulative >= investment {
            if i == 0 {
                return Some(1.0);
            }
            // Fraction of the crossing year needed to close the gap
            let remaining = investment - before;
            let fraction = if record.savings > 0.0 {
                remaining / record.savings
            } else {
                0.0
            };
            let period = i as f64 + fraction;
            return Some((period * 10.0).round() / 10.0);
        }
    }
    None
}

/// Calendar year in which payback completes
pub fn payback_calendar_year(payback_years: f64) -> i32 {
    Utc::now().year() + payback_years.ceil() as i32
}

/// Annualized rate of return in % over the lifetime
///
/// Defined only for a positive investment and a positive compounding base;
/// full subsidies can push the investment to zero, in which case there is
/// no meaningful rate.
pub fn annualized_return_rate(
    investment: f64,
    net_benefit: f64,
    lifetime_years: u32,
) -> Option<f64> {
    if investment <= 0.0 || lifetime_years == 0 {
        return None;
    }
    let base = (investment + net_benefit) / investment;
    if base <= 0.0 {
        return None;
    }
    Some((base.powf(1.0 / lifetime_years as f64) - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_savings(savings: f64, years: u32) -> Vec<YearRecord> {
        (0..years)
            .map(|year| YearRecord {
                year,
                current_system_cost: savings,
                heat_pump_cost: 0.0,
                savings,
                cumulative_savings: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_constant_savings_closed_form() {
        // 1000/yr against 4000: exactly 4 years
        let records = constant_savings(1000.0, 10);
        assert_eq!(payback_period(&records, 4000.0), Some(4.0));

        // 4500 crosses mid-year 5: 4 + 500/1000
        assert_eq!(payback_period(&records, 4500.0), Some(4.5));
    }

    #[test]
    fn test_first_year_crossing_pins_to_one() {
        let records = constant_savings(5000.0, 10);
        assert_eq!(payback_period(&records, 3000.0), Some(1.0));
    }

    #[test]
    fn test_unreached_payback_is_none() {
        let records = constant_savings(100.0, 10);
        assert_eq!(payback_period(&records, 5000.0), None);

        // Negative savings never recover anything
        let records = constant_savings(-50.0, 10);
        assert_eq!(payback_period(&records, 1000.0), None);
    }

    #[test]
    fn test_payback_within_lifetime_bounds() {
        let records = constant_savings(800.0, 17);
        let period = payback_period(&records, 10_000.0).unwrap();
        assert!(period > 0.0 && period <= 17.0);
    }

    #[test]
    fn test_calendar_year_uses_ceiling() {
        let this_year = Utc::now().year();
        assert_eq!(payback_calendar_year(4.2), this_year + 5);
        assert_eq!(payback_calendar_year(4.0), this_year + 4);
    }

    #[test]
    fn test_annualized_return() {
        // Doubling over 10 years: 2^(1/10) - 1 per year
        let rate = annualized_return_rate(10_000.0, 10_000.0, 10).unwrap();
        let expected = (2.0_f64.powf(0.1) - 1.0) * 100.0;
        assert!((rate - expected).abs() < 1e-9);
    }

    #[test]
    fn test_annualized_return_degenerate_cases() {
        assert!(annualized_return_rate(0.0, 5000.0, 10).is_none());
        // Losses beyond the investment leave no positive base
        assert!(annualized_return_rate(1000.0, -2000.0, 10).is_none());
    }
}
