//! Risk classification.
//!
//! Risk is drift between three progress signals: time, deliverables and
//! money. A grant 90% through its timeline but 40% through its milestones is
//! risky even though neither figure alone looks alarming.

use rust_decimal::Decimal;

use crate::config::RiskSettings;
use crate::models::RiskLevel;

/// A risk score and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Mean absolute deviation of milestone and utilization progress from
    /// timeline progress.
    pub score: Decimal,
    /// Classification of `score`.
    pub level: RiskLevel,
}

/// Classifies risk from timeline, utilization and milestone progress.
///
/// `score = (|t - m| + |t - u|) / 2`; below `low_threshold` is low, below
/// `medium_threshold` is medium, anything else is high.
///
/// # Examples
///
/// ```
/// use grant_metrics::calculation::classify_risk;
/// use grant_metrics::config::RiskSettings;
/// use grant_metrics::models::RiskLevel;
/// use rust_decimal::Decimal;
///
/// let settings = RiskSettings::default();
/// let risk = classify_risk(Decimal::new(9, 1), Decimal::new(85, 2), Decimal::new(4, 1), &settings);
/// assert_eq!(risk.level, RiskLevel::Medium);
/// ```
pub fn classify_risk(
    timeline_progress: Decimal,
    utilization_rate: Decimal,
    milestone_completion_rate: Decimal,
    settings: &RiskSettings,
) -> RiskAssessment {
    // Drift past the decimal range saturates to the highest score
    let score = timeline_progress
        .checked_sub(milestone_completion_rate)
        .zip(timeline_progress.checked_sub(utilization_rate))
        .and_then(|(milestone, financial)| milestone.abs().checked_add(financial.abs()))
        .map(|total| total / Decimal::TWO)
        .unwrap_or(Decimal::MAX);

    let level = if score < settings.low_threshold {
        RiskLevel::Low
    } else if score < settings.medium_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    RiskAssessment { score, level }
}
