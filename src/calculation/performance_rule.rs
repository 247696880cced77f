//! Performance requirement evaluation.
//!
//! Every KPI with a nonzero target must reach `min_achievement_rate`.
//! Zero-target KPIs have no meaningful ratio and are skipped.

use crate::config::ComplianceSettings;
use crate::models::{ComplianceRequirement, Grant, RequirementStatus};

use super::RuleOutcome;

/// Evaluates a performance requirement, stopping at the first KPI below the floor.
///
/// A KPI whose achievement exceeds the decimal range leaves the requirement
/// pending.
pub fn evaluate_performance(
    grant: &Grant,
    requirement: &ComplianceRequirement,
    settings: &ComplianceSettings,
) -> RuleOutcome {
    let min_rate = requirement
        .parameters
        .min_achievement_rate()
        .unwrap_or(settings.default_min_achievement_rate);
    let mut evidence = Vec::with_capacity(grant.kpis().len());

    for kpi in grant.kpis() {
        if kpi.target_value.is_zero() {
            evidence.push(format!("KPI '{}' has no target; skipped", kpi.name));
            continue;
        }

        let Some(achievement) = kpi.achievement() else {
            evidence.push(format!(
                "KPI '{}' achievement exceeds the supported range",
                kpi.name
            ));
            return RuleOutcome::new(RequirementStatus::Pending, evidence);
        };
        if achievement < min_rate {
            evidence.push(format!(
                "KPI '{}' achievement {} below minimum {}",
                kpi.name,
                achievement.round_dp(4).normalize(),
                min_rate.normalize()
            ));
            return RuleOutcome::new(RequirementStatus::NonCompliant, evidence);
        }

        evidence.push(format!(
            "KPI '{}' achievement {} meets minimum {}",
            kpi.name,
            achievement.round_dp(4).normalize(),
            min_rate.normalize()
        ));
    }

    RuleOutcome::new(RequirementStatus::Compliant, evidence)
}
