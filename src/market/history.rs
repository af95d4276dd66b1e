//! Derivation of price-evolution parameters from monthly price history
//!
//! The recent rate blends the 10-year annualized trend with the full-history
//! trend. The equilibrium rate starts from a structural prior per carrier
//! and is nudged toward the empirical average of non-crisis years, a crisis
//! year being one whose year-over-year move exceeds a fixed threshold.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::evolution::PriceEvolutionModel;

/// One observed monthly price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub price: f64,
}

/// Blend weights and thresholds for model derivation
///
/// The weights are conventions, not fitted constants; they are carried as
/// parameters so a caller can override them.
#[derive(Debug, Clone, Copy)]
pub struct ModelWeights {
    /// Weight of the 10-year trend in the recent rate (rest: full history)
    pub recent_window_weight: f64,

    /// Weight of the structural prior in the equilibrium rate
    /// (rest: empirical non-crisis average)
    pub structural_weight: f64,

    /// Absolute year-over-year change in % flagging a crisis year
    pub crisis_threshold_pct: f64,

    /// Transition window handed to the resulting model
    pub transition_years: u32,
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            recent_window_weight: 0.70,
            structural_weight: 0.80,
            crisis_threshold_pct: 10.0,
            transition_years: super::evolution::DEFAULT_TRANSITION_YEARS,
        }
    }
}

/// Minimum number of usable monthly points required for a derivation
pub const MIN_MONTHLY_POINTS: usize = 24;

/// Months in the recent trend window
const RECENT_WINDOW_MONTHS: usize = 120;

/// Drop NaN, non-finite and non-positive prices, and sort by month
pub fn usable_points(points: &[MonthlyPoint]) -> Vec<MonthlyPoint> {
    let mut usable: Vec<MonthlyPoint> = points
        .iter()
        .copied()
        .filter(|p| p.price.is_finite() && p.price > 0.0)
        .collect();
    usable.sort_by_key(|p| p.month);
    usable
}

/// Annualized growth rate in % across a window of monthly points
///
/// Returns None when the window is too short or the endpoint ratio is
/// degenerate.
pub fn annualized_rate(points: &[MonthlyPoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let first = points.first()?.price;
    let last = points.last()?.price;
    if first <= 0.0 || last <= 0.0 {
        return None;
    }
    let months = (points.len() - 1) as f64;
    let ratio = last / first;
    Some((ratio.powf(12.0 / months) - 1.0) * 100.0)
}

/// Calendar-year average prices, oldest first
fn yearly_averages(points: &[MonthlyPoint]) -> Vec<(i32, f64)> {
    let mut years: Vec<(i32, f64, u32)> = Vec::new();
    for p in points {
        let year = p.month.year();
        match years.last_mut() {
            Some((y, sum, n)) if *y == year => {
                *sum += p.price;
                *n += 1;
            }
            _ => years.push((year, p.price, 1)),
        }
    }
    years
        .into_iter()
        .map(|(y, sum, n)| (y, sum / n as f64))
        .collect()
}

/// Average year-over-year change in % across non-crisis years
///
/// Returns None when no usable year pair survives the crisis filter.
pub fn non_crisis_average_rate(points: &[MonthlyPoint], crisis_threshold_pct: f64) -> Option<f64> {
    let years = yearly_averages(points);
    let mut sum = 0.0;
    let mut count = 0u32;
    for pair in years.windows(2) {
        let (prev, next) = (pair[0].1, pair[1].1);
        if prev <= 0.0 {
            continue;
        }
        let change = (next / prev - 1.0) * 100.0;
        if change.abs() > crisis_threshold_pct {
            continue;
        }
        sum += change;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Derive a price-evolution model from a monthly series and a structural prior
///
/// Returns None when the series is too short or the trend arithmetic
/// degenerates; the caller then falls back to its static default model.
pub fn derive_model(
    points: &[MonthlyPoint],
    structural_prior_pct: f64,
    weights: &ModelWeights,
) -> Option<PriceEvolutionModel> {
    let usable = usable_points(points);
    if usable.len() < MIN_MONTHLY_POINTS {
        return None;
    }

    let full_trend = annualized_rate(&usable)?;
    let recent_window = if usable.len() > RECENT_WINDOW_MONTHS {
        &usable[usable.len() - RECENT_WINDOW_MONTHS..]
    } else {
        &usable[..]
    };
    let recent_trend = annualized_rate(recent_window)?;

    let w = weights.recent_window_weight;
    let recent_rate = w * recent_trend + (1.0 - w) * full_trend;

    let equilibrium_rate = match non_crisis_average_rate(&usable, weights.crisis_threshold_pct) {
        Some(empirical) => {
            let s = weights.structural_weight;
            s * structural_prior_pct + (1.0 - s) * empirical
        }
        None => structural_prior_pct,
    };

    Some(PriceEvolutionModel {
        recent_rate,
        equilibrium_rate,
        transition_years: weights.transition_years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(start_year: i32, monthly_prices: &[f64]) -> Vec<MonthlyPoint> {
        monthly_prices
            .iter()
            .enumerate()
            .map(|(i, &price)| MonthlyPoint {
                month: NaiveDate::from_ymd_opt(
                    start_year + (i / 12) as i32,
                    (i % 12) as u32 + 1,
                    1,
                )
                .unwrap(),
                price,
            })
            .collect()
    }

    /// Geometric series growing at `annual_pct` per year
    fn growing_series(start_year: i32, months: usize, annual_pct: f64) -> Vec<MonthlyPoint> {
        let monthly = (1.0 + annual_pct / 100.0_f64).powf(1.0 / 12.0);
        let prices: Vec<f64> = (0..months).map(|i| 100.0 * monthly.powi(i as i32)).collect();
        series(start_year, &prices)
    }

    #[test]
    fn test_usable_points_filters_bad_values() {
        let mut points = series(2020, &[1.0, 2.0, 3.0]);
        points.push(MonthlyPoint {
            month: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            price: f64::NAN,
        });
        points.push(MonthlyPoint {
            month: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            price: -4.0,
        });
        assert_eq!(usable_points(&points).len(), 3);
    }

    #[test]
    fn test_annualized_rate_recovers_growth() {
        let points = growing_series(2010, 121, 4.0);
        let rate = annualized_rate(&points).unwrap();
        assert!((rate - 4.0).abs() < 0.01, "got {}", rate);
    }

    #[test]
    fn test_annualized_rate_degenerate_inputs() {
        assert!(annualized_rate(&[]).is_none());
        assert!(annualized_rate(&series(2020, &[1.0])).is_none());
    }

    #[test]
    fn test_crisis_years_are_filtered() {
        // 2 % yearly drift with one +30 % shock year in the middle
        let mut prices = Vec::new();
        let mut level: f64 = 100.0;
        for year in 0..8 {
            let growth: f64 = if year == 4 { 30.0 } else { 2.0 };
            let monthly = (1.0 + growth / 100.0).powf(1.0 / 12.0);
            for _ in 0..12 {
                level *= monthly;
                prices.push(level);
            }
        }
        let points = series(2012, &prices);
        let avg = non_crisis_average_rate(&points, 10.0).unwrap();
        // The shock year (and its base-effect neighbor) must not drag the
        // average far from the 2 % drift
        assert!(avg < 5.0, "got {}", avg);
    }

    #[test]
    fn test_derive_model_needs_enough_history() {
        let short = growing_series(2023, 12, 5.0);
        assert!(derive_model(&short, 3.0, &ModelWeights::default()).is_none());
    }

    #[test]
    fn test_derive_model_blends_trends() {
        let points = growing_series(2005, 240, 6.0);
        let model = derive_model(&points, 3.0, &ModelWeights::default()).unwrap();
        // Uniform growth: both windows agree, so the blend returns it
        assert!((model.recent_rate - 6.0).abs() < 0.05);
        // Steady 6 % years are non-crisis, so the prior is nudged upward
        assert!(model.equilibrium_rate > 3.0);
        assert!(model.equilibrium_rate < 6.0);
        assert_eq!(model.transition_years, 5);
    }
}
