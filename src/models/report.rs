//! Report- and dashboard-shaped payloads combining calculator outputs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ComplianceSummary, GrantProgressMetrics, GrantStatus, OverallCompliance, RiskLevel};

/// Spending figures for one grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Total funding available.
    pub total_funding: Decimal,
    /// Amount awarded.
    pub awarded_amount: Decimal,
    /// All expenditures regardless of status.
    pub gross_spend: Decimal,
    /// Approved expenditures.
    pub approved_spend: Decimal,
    /// Expenditures awaiting approval.
    pub pending_spend: Decimal,
    /// Rejected expenditures.
    pub rejected_spend: Decimal,
    /// Total funding less approved spend.
    pub remaining_funds: Decimal,
    /// Gross spend over total funding.
    pub gross_utilization: Decimal,
    /// Approved spend over total funding.
    pub approved_utilization: Decimal,
}

/// Milestone counts for one grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSummary {
    /// All milestones.
    pub total: u32,
    /// Pending milestones.
    pub pending: u32,
    /// Milestones in progress.
    pub in_progress: u32,
    /// Completed milestones.
    pub completed: u32,
    /// Milestones marked delayed.
    pub delayed: u32,
    /// Not completed and past their due date.
    pub overdue: u32,
}

/// Achievement of one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// KPI name.
    pub name: String,
    /// Target value.
    pub target_value: Decimal,
    /// Current value.
    pub current_value: Decimal,
    /// Achievement ratio.
    pub achievement: Decimal,
    /// Whether the achievement meets the configured minimum.
    ///
    /// KPIs with a zero target are always reported as on track.
    pub on_track: bool,
}

/// Full report for one grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The evaluation date.
    pub as_of: NaiveDate,
    /// The grant reported on.
    pub grant_id: String,
    /// The grant's name.
    pub grant_name: String,
    /// The grant's lifecycle status.
    pub grant_status: GrantStatus,
    /// The grant's revision at report time.
    pub grant_version: u64,
    /// Progress and risk.
    pub progress: GrantProgressMetrics,
    /// Compliance evaluation.
    pub compliance: ComplianceSummary,
    /// Spending.
    pub financial: FinancialSummary,
    /// Milestone counts.
    pub milestones: MilestoneSummary,
    /// Per-KPI achievement.
    pub kpis: Vec<KpiSummary>,
}

/// Grants per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    /// Low risk grants.
    pub low: u32,
    /// Medium risk grants.
    pub medium: u32,
    /// High risk grants.
    pub high: u32,
}

impl RiskDistribution {
    /// Increments the counter for `level`.
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }
}

/// Grants per overall compliance status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceDistribution {
    /// Compliant grants.
    pub compliant: u32,
    /// At-risk grants.
    pub at_risk: u32,
    /// Non-compliant grants.
    pub non_compliant: u32,
}

impl ComplianceDistribution {
    /// Increments the counter for `status`.
    pub fn record(&mut self, status: OverallCompliance) {
        match status {
            OverallCompliance::Compliant => self.compliant += 1,
            OverallCompliance::AtRisk => self.at_risk += 1,
            OverallCompliance::NonCompliant => self.non_compliant += 1,
        }
    }
}

/// One dashboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardGrant {
    /// Grant identifier.
    pub grant_id: String,
    /// Grant name.
    pub grant_name: String,
    /// Risk level.
    pub risk_level: RiskLevel,
    /// Timeline progress.
    pub timeline_progress: Decimal,
    /// Utilization used for risk.
    pub utilization_rate: Decimal,
    /// Milestone completion rate.
    pub milestone_completion_rate: Decimal,
    /// Compliance rate.
    pub compliance_rate: Decimal,
    /// Overall compliance.
    pub compliance_status: OverallCompliance,
}

/// A grant excluded from the dashboard because it could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFailure {
    /// Grant identifier.
    pub grant_id: String,
    /// Why evaluation failed.
    pub error: String,
}

/// Portfolio view across many grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// The evaluation date.
    pub as_of: NaiveDate,
    /// Grants submitted.
    pub total_grants: u32,
    /// Grants evaluated successfully.
    pub evaluated_grants: u32,
    /// Risk levels of evaluated grants.
    pub risk_distribution: RiskDistribution,
    /// Compliance statuses of evaluated grants.
    pub compliance_distribution: ComplianceDistribution,
    /// Total funding of evaluated grants.
    pub total_funding: Decimal,
    /// Gross spend of evaluated grants.
    pub total_gross_spend: Decimal,
    /// Approved spend of evaluated grants.
    pub total_approved_spend: Decimal,
    /// Mean compliance rate of evaluated grants; 1 when none were evaluated.
    pub average_compliance_rate: Decimal,
    /// Per-grant rows in input order.
    pub grants: Vec<DashboardGrant>,
    /// Grants that failed evaluation.
    pub failures: Vec<DashboardFailure>,
}
