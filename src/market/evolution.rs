//! Energy-price evolution model
//!
//! Prices are projected with a mean-reversion model: the currently observed
//! growth rate decays linearly toward a long-run equilibrium rate over a
//! fixed transition window, then holds. Rates are annual percentages.

use serde::{Deserialize, Serialize};

/// Default length of the transition window in years
pub const DEFAULT_TRANSITION_YEARS: u32 = 5;

/// Parameters of the price evolution for one energy carrier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEvolutionModel {
    /// Annual growth rate observed over the recent past, in %
    pub recent_rate: f64,

    /// Long-run structural growth rate, in %
    pub equilibrium_rate: f64,

    /// Years over which the recent rate decays to equilibrium
    pub transition_years: u32,
}

impl PriceEvolutionModel {
    pub fn new(recent_rate: f64, equilibrium_rate: f64) -> Self {
        Self {
            recent_rate,
            equilibrium_rate,
            transition_years: DEFAULT_TRANSITION_YEARS,
        }
    }

    /// Constant-rate model, for sensitivity scenarios
    pub fn linear(rate: f64) -> Self {
        Self {
            recent_rate: rate,
            equilibrium_rate: rate,
            transition_years: 0,
        }
    }

    /// Annual growth rate in % applicable during projection year `year`
    ///
    /// Year 0 carries the full recent rate; the rate then interpolates
    /// linearly until `transition_years`, after which it holds at the
    /// equilibrium rate.
    pub fn rate_for_year(&self, year: u32) -> f64 {
        if self.transition_years == 0 || year >= self.transition_years {
            return self.equilibrium_rate;
        }
        let progress = year as f64 / self.transition_years as f64;
        self.recent_rate + (self.equilibrium_rate - self.recent_rate) * progress
    }

    /// Compounded price multiplier from year 0 up to (excluding) `year`
    ///
    /// `cumulative_factor(0)` is 1 by definition: year-0 costs are billed
    /// at today's prices.
    pub fn cumulative_factor(&self, year: u32) -> f64 {
        let mut factor = 1.0;
        for y in 0..year {
            factor *= 1.0 + self.rate_for_year(y) / 100.0;
        }
        factor
    }

    /// Shifted copy, both rates moved by `delta` points
    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            recent_rate: self.recent_rate + delta,
            equilibrium_rate: self.equilibrium_rate + delta,
            transition_years: self.transition_years,
        }
    }
}
