//! Portfolio dashboard across many grants.
//!
//! Each grant is evaluated in isolation. A grant with invalid data is listed
//! under `failures` and never aborts evaluation of the others.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::models::{
    ComplianceDistribution, DashboardFailure, DashboardGrant, DashboardSummary, Grant,
    RiskDistribution,
};

use super::{assess_compliance, calculate_progress};

/// Running sums over the evaluated grants.
#[derive(Debug, Clone, Copy, Default)]
struct PortfolioTotals {
    funding: Decimal,
    gross_spend: Decimal,
    approved_spend: Decimal,
    compliance_rate_sum: Decimal,
}

impl PortfolioTotals {
    /// Returns the totals with one more grant added, or `None` if any sum
    /// leaves the decimal range.
    fn add(
        &self,
        funding: Decimal,
        gross_spend: Decimal,
        approved_spend: Decimal,
        compliance_rate: Decimal,
    ) -> Option<Self> {
        Some(Self {
            funding: self.funding.checked_add(funding)?,
            gross_spend: self.gross_spend.checked_add(gross_spend)?,
            approved_spend: self.approved_spend.checked_add(approved_spend)?,
            compliance_rate_sum: self.compliance_rate_sum.checked_add(compliance_rate)?,
        })
    }
}

/// Builds the dashboard for `grants` at `as_of`.
///
/// Compliance for each grant is assessed against its own requirement set.
pub fn build_dashboard(grants: &[Grant], as_of: NaiveDate, config: &EngineConfig) -> DashboardSummary {
    let mut rows = Vec::with_capacity(grants.len());
    let mut failures = Vec::new();
    let mut risk_distribution = RiskDistribution::default();
    let mut compliance_distribution = ComplianceDistribution::default();
    let mut totals = PortfolioTotals::default();

    for grant in grants {
        let progress = match calculate_progress(grant, as_of, &config.risk) {
            Ok(progress) => progress,
            Err(err) => {
                warn!(grant_id = %grant.id(), error = %err, "Skipping grant on dashboard");
                failures.push(DashboardFailure {
                    grant_id: grant.id().to_string(),
                    error: err.to_string(),
                });
                continue;
            }
        };
        let compliance = assess_compliance(
            grant,
            grant.compliance_requirements(),
            as_of,
            &config.compliance,
        );

        let Some(next) = totals.add(
            grant.total_funding(),
            progress.funds_utilized,
            progress.approved_funds,
            compliance.compliance_rate,
        ) else {
            warn!(grant_id = %grant.id(), "Skipping grant on dashboard, portfolio totals overflow");
            failures.push(DashboardFailure {
                grant_id: grant.id().to_string(),
                error: "Portfolio totals exceed the supported range".to_string(),
            });
            continue;
        };
        totals = next;

        risk_distribution.record(progress.risk_level);
        compliance_distribution.record(compliance.status);

        rows.push(DashboardGrant {
            grant_id: grant.id().to_string(),
            grant_name: grant.name().to_string(),
            risk_level: progress.risk_level,
            timeline_progress: progress.timeline_progress,
            utilization_rate: progress.utilization_rate,
            milestone_completion_rate: progress.milestone_completion_rate,
            compliance_rate: compliance.compliance_rate,
            compliance_status: compliance.status,
        });
    }

    let evaluated_grants = rows.len() as u32;
    let average_compliance_rate = if evaluated_grants == 0 {
        Decimal::ONE
    } else {
        totals.compliance_rate_sum / Decimal::from(evaluated_grants)
    };

    info!(
        total_grants = grants.len(),
        evaluated_grants,
        failed_grants = failures.len(),
        high_risk = risk_distribution.high,
        "Built dashboard"
    );

    DashboardSummary {
        as_of,
        total_grants: grants.len() as u32,
        evaluated_grants,
        risk_distribution,
        compliance_distribution,
        total_funding: totals.funding,
        total_gross_spend: totals.gross_spend,
        total_approved_spend: totals.approved_spend,
        average_compliance_rate,
        grants: rows,
        failures,
    }
}
