//! Progress metrics derived from a grant snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Qualitative classification of drift between progress signals.
///
/// # Example
///
/// ```
/// use grant_metrics::models::RiskLevel;
///
/// assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Timeline, deliverables and spending move together.
    Low,
    /// Noticeable drift between signals.
    Medium,
    /// Signals have diverged substantially.
    High,
}

/// Progress, utilization and risk figures for one grant at one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantProgressMetrics {
    /// The grant evaluated.
    pub grant_id: String,
    /// The evaluation date.
    pub as_of: NaiveDate,
    /// Days elapsed since the start date, clamped to `[0, total_days]`.
    pub elapsed_days: i64,
    /// Length of the grant period, both ends inclusive.
    pub total_days: i64,
    /// `elapsed_days / total_days`, in `[0, 1]`.
    pub timeline_progress: Decimal,
    /// Sum of all expenditure amounts regardless of status.
    pub funds_utilized: Decimal,
    /// Sum of approved expenditure amounts.
    pub approved_funds: Decimal,
    /// `funds_utilized / total_funding`, 0 without funding.
    pub gross_utilization: Decimal,
    /// `approved_funds / total_funding`, 0 without funding.
    pub approved_utilization: Decimal,
    /// The utilization figure used for risk, per the configured basis.
    pub utilization_rate: Decimal,
    /// Completed share of milestones, 0 without milestones.
    pub milestone_completion_rate: Decimal,
    /// Mean drift of milestone and utilization progress from the timeline.
    pub risk_score: Decimal,
    /// Classification of `risk_score`.
    pub risk_level: RiskLevel,
    /// Achievement ratio per KPI name.
    pub kpi_achievement: BTreeMap<String, Decimal>,
}
