//! Progress metrics for a single grant.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::RiskSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Grant, GrantProgressMetrics, Milestone};

use super::{calculate_timeline, calculate_utilization, classify_risk};

/// Completed share of milestones; 0 when there are none.
pub fn milestone_completion_rate(milestones: &[Milestone]) -> Decimal {
    if milestones.is_empty() {
        return Decimal::ZERO;
    }

    let completed = milestones.iter().filter(|m| m.is_completed()).count();
    Decimal::from(completed) / Decimal::from(milestones.len())
}

/// Achievement ratio per KPI name.
///
/// Zero-target KPIs map to their current value (see
/// [`crate::models::Kpi::achievement`]). A ratio beyond the decimal range
/// yields [`EngineError::InvalidGrant`].
pub fn kpi_achievements(grant: &Grant) -> EngineResult<BTreeMap<String, Decimal>> {
    grant
        .kpis()
        .iter()
        .map(|kpi| {
            let achievement = kpi.achievement().ok_or_else(|| EngineError::InvalidGrant {
                grant_id: grant.id().to_string(),
                message: format!("KPI '{}' achievement exceeds the supported range", kpi.name),
            })?;
            Ok((kpi.name.clone(), achievement))
        })
        .collect()
}

/// Calculates progress, utilization and risk for a grant at `as_of`.
///
/// The grant is validated first; an inverted timeline, negative funding or a
/// negative expenditure yields [`EngineError::InvalidGrant`], as do spend
/// totals, utilization ratios or KPI achievements beyond the decimal range.
/// Nothing else fails: zero funding, no milestones and zero-target KPIs all
/// have defined fallbacks.
///
/// # Examples
///
/// ```
/// use grant_metrics::calculation::calculate_progress;
/// use grant_metrics::config::RiskSettings;
/// use grant_metrics::models::{Grant, RiskLevel};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let grant = Grant::new(
///     "grant_001",
///     "Community Literacy",
///     Decimal::ZERO,
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
/// );
/// let as_of = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
/// let metrics = calculate_progress(&grant, as_of, &RiskSettings::default()).unwrap();
///
/// assert_eq!(metrics.utilization_rate, Decimal::ZERO);
/// assert_eq!(metrics.milestone_completion_rate, Decimal::ZERO);
/// assert_eq!(metrics.risk_level, RiskLevel::Low);
/// ```
pub fn calculate_progress(
    grant: &Grant,
    as_of: NaiveDate,
    settings: &RiskSettings,
) -> EngineResult<GrantProgressMetrics> {
    grant.validate()?;

    let timeline = calculate_timeline(grant, as_of)?;
    let utilization = calculate_utilization(grant)?;
    let utilization_rate = utilization.rate_for(settings.utilization_basis);
    let completion_rate = milestone_completion_rate(grant.milestones());
    let risk = classify_risk(timeline.progress, utilization_rate, completion_rate, settings);

    debug!(
        grant_id = %grant.id(),
        %as_of,
        timeline_progress = %timeline.progress.round_dp(4),
        utilization_rate = %utilization_rate.round_dp(4),
        milestone_completion_rate = %completion_rate.round_dp(4),
        risk_score = %risk.score.round_dp(4),
        risk_level = ?risk.level,
        "Calculated grant progress"
    );

    Ok(GrantProgressMetrics {
        grant_id: grant.id().to_string(),
        as_of,
        elapsed_days: timeline.elapsed_days,
        total_days: timeline.total_days,
        timeline_progress: timeline.progress,
        funds_utilized: utilization.funds_utilized,
        approved_funds: utilization.approved_funds,
        gross_utilization: utilization.gross,
        approved_utilization: utilization.approved,
        utilization_rate,
        milestone_completion_rate: completion_rate,
        risk_score: risk.score,
        risk_level: risk.level,
        kpi_achievement: kpi_achievements(grant)?,
    })
}
