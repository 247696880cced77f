//! Funds utilization.
//!
//! Two utilization figures coexist: gross (every expenditure, whatever its
//! status) and approved (approved expenditures only). Both are exposed under
//! their own names; consumers pick the one they need.

use rust_decimal::Decimal;

use crate::config::UtilizationBasis;
use crate::error::{EngineError, EngineResult};
use crate::models::Grant;

/// Spend totals and their share of total funding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utilization {
    /// Sum of all expenditure amounts.
    pub funds_utilized: Decimal,
    /// Sum of approved expenditure amounts.
    pub approved_funds: Decimal,
    /// `funds_utilized / total_funding`.
    pub gross: Decimal,
    /// `approved_funds / total_funding`.
    pub approved: Decimal,
}

impl Utilization {
    /// Returns the utilization figure for `basis`.
    pub fn rate_for(&self, basis: UtilizationBasis) -> Decimal {
        match basis {
            UtilizationBasis::Approved => self.approved,
            UtilizationBasis::Gross => self.gross,
        }
    }
}

/// Divides `amount` by `total_funding`, returning 0 when there is no funding.
///
/// `None` when the quotient exceeds the decimal range (a tiny nonzero
/// funding figure against a large spend).
///
/// # Examples
///
/// ```
/// use grant_metrics::calculation::utilization_ratio;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     utilization_ratio(Decimal::new(49_000, 0), Decimal::new(100_000, 0)),
///     Some(Decimal::new(49, 2))
/// );
/// assert_eq!(utilization_ratio(Decimal::new(500, 0), Decimal::ZERO), Some(Decimal::ZERO));
/// ```
pub fn utilization_ratio(amount: Decimal, total_funding: Decimal) -> Option<Decimal> {
    if total_funding.is_zero() {
        Some(Decimal::ZERO)
    } else {
        amount.checked_div(total_funding)
    }
}

/// Computes gross and approved utilization for a grant.
///
/// Spend totals or ratios beyond the decimal range yield
/// [`EngineError::InvalidGrant`].
pub fn calculate_utilization(grant: &Grant) -> EngineResult<Utilization> {
    let out_of_range = |what: &str| EngineError::InvalidGrant {
        grant_id: grant.id().to_string(),
        message: format!("{} exceeds the supported range", what),
    };
    let total_funding = grant.total_funding();

    let funds_utilized = grant.gross_spend().ok_or_else(|| out_of_range("expenditure total"))?;
    let approved_funds = grant
        .approved_spend()
        .ok_or_else(|| out_of_range("approved expenditure total"))?;
    let gross = utilization_ratio(funds_utilized, total_funding)
        .ok_or_else(|| out_of_range("gross utilization"))?;
    let approved = utilization_ratio(approved_funds, total_funding)
        .ok_or_else(|| out_of_range("approved utilization"))?;

    Ok(Utilization {
        funds_utilized,
        approved_funds,
        gross,
        approved,
    })
}
