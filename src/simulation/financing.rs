//! Loan amortization and real-investment arithmetic
//!
//! The "real investment" is the figure payback and ROI are measured
//! against: what the household actually disburses over the project,
//! which depends on the financing mode.

use serde::{Deserialize, Serialize};

use crate::project::data::{FinancingMode, FinancingTerms};

/// Financing figures for one project
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinancingResult {
    /// Monthly loan payment, 0 for cash projects
    pub monthly_payment: f64,

    /// Total paid to the lender (principal + interest), 0 for cash
    pub total_credit_cost: f64,

    /// Amount the payback and ROI calculations are measured against
    pub real_investment: f64,
}

/// Standard amortization payment
///
/// Degenerate inputs return 0 rather than erroring: a zero principal or
/// term means nothing is borrowed. A zero rate degrades to straight-line
/// repayment.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_months: u32) -> f64 {
    if principal <= 0.0 || term_months == 0 {
        return 0.0;
    }
    if annual_rate_pct == 0.0 {
        return principal / term_months as f64;
    }
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(term_months as i32)))
}

/// Total cost of a loan over its full term
pub fn total_credit_cost(principal: f64, annual_rate_pct: f64, term_months: u32) -> f64 {
    monthly_payment(principal, annual_rate_pct, term_months) * term_months as f64
}

/// Compute the financing figures for a net-of-subsidy project cost
pub fn compute(terms: &FinancingTerms, net_cost: f64) -> FinancingResult {
    match terms.mode {
        FinancingMode::Cash => FinancingResult {
            monthly_payment: 0.0,
            total_credit_cost: 0.0,
            real_investment: net_cost,
        },
        FinancingMode::Credit => {
            let payment = monthly_payment(net_cost, terms.annual_rate_pct, terms.term_months);
            let credit_cost = payment * terms.term_months as f64;
            FinancingResult {
                monthly_payment: payment,
                total_credit_cost: credit_cost,
                real_investment: credit_cost,
            }
        }
        FinancingMode::Mixed => {
            let principal = (net_cost - terms.down_payment).max(0.0);
            let payment = monthly_payment(principal, terms.annual_rate_pct, terms.term_months);
            let credit_cost = payment * terms.term_months as f64;
            FinancingResult {
                monthly_payment: payment,
                total_credit_cost: credit_cost,
                real_investment: terms.down_payment + credit_cost,
            }
        }
    }
}
