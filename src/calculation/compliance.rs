//! Compliance evaluation and aggregation.
//!
//! Each requirement is evaluated on its own; there is no ordering dependency
//! between requirements. Results are aggregated into a [`ComplianceSummary`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ComplianceSettings;
use crate::models::{
    ComplianceRequirement, ComplianceStatus, ComplianceSummary, Grant, OverallCompliance,
    RequirementStatus, RequirementType, Severity, SeverityCounts,
};

use super::{evaluate_documentation, evaluate_financial, evaluate_performance, evaluate_reporting};

/// The status a rule reached and the evidence it recorded on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// The rule's verdict.
    pub status: RequirementStatus,
    /// Checks performed, in order.
    pub evidence: Vec<String>,
}

impl RuleOutcome {
    /// Creates an outcome.
    pub fn new(status: RequirementStatus, evidence: Vec<String>) -> Self {
        Self { status, evidence }
    }
}

/// Evaluates a single requirement against a grant at `as_of`.
///
/// A requirement whose `applicable_from` lies after `as_of` is
/// not applicable and carries no evidence. An unrecognized requirement type
/// is pending: it needs evaluator support, it is not a caller error.
pub fn evaluate_requirement(
    grant: &Grant,
    requirement: &ComplianceRequirement,
    as_of: NaiveDate,
    settings: &ComplianceSettings,
) -> ComplianceStatus {
    let outcome = match requirement.applicable_from {
        Some(applicable_from) if applicable_from > as_of => {
            RuleOutcome::new(RequirementStatus::NotApplicable, Vec::new())
        }
        _ => match requirement.requirement_type {
            RequirementType::Documentation => evaluate_documentation(grant, requirement),
            RequirementType::Financial => evaluate_financial(grant, requirement, settings),
            RequirementType::Reporting => evaluate_reporting(grant, requirement, as_of, settings),
            RequirementType::Performance => evaluate_performance(grant, requirement, settings),
            RequirementType::Unrecognized => RuleOutcome::new(
                RequirementStatus::Pending,
                vec!["Requirement type is not supported by this evaluator".to_string()],
            ),
        },
    };

    ComplianceStatus {
        requirement_id: requirement.id.clone(),
        requirement_name: requirement.name.clone(),
        requirement_type: requirement.requirement_type,
        status: outcome.status,
        evidence: outcome.evidence,
        severity: requirement.severity,
        due_date: requirement.due_date,
    }
}

/// Aggregates per-requirement outcomes into a summary.
///
/// Any non-compliant requirement makes the grant non-compliant when one of
/// them is high severity, otherwise at risk. Without breaches, a pending
/// share above `pending_at_risk_ratio` is at risk. With no requirements the
/// rate is 1 and the grant is compliant.
pub fn summarize_compliance(
    grant_id: &str,
    evaluated_on: NaiveDate,
    statuses: Vec<ComplianceStatus>,
    settings: &ComplianceSettings,
) -> ComplianceSummary {
    let mut compliant_count = 0u32;
    let mut non_compliant_count = 0u32;
    let mut pending_count = 0u32;
    let mut not_applicable_count = 0u32;
    let mut issues_by_severity = SeverityCounts::default();

    for status in &statuses {
        match status.status {
            RequirementStatus::Compliant => compliant_count += 1,
            RequirementStatus::NonCompliant => {
                non_compliant_count += 1;
                issues_by_severity.record(status.severity);
            }
            RequirementStatus::Pending => pending_count += 1,
            RequirementStatus::NotApplicable => not_applicable_count += 1,
        }
    }

    let total_requirements = statuses.len() as u32;
    let compliance_rate = if total_requirements == 0 {
        Decimal::ONE
    } else {
        Decimal::from(compliant_count) / Decimal::from(total_requirements)
    };

    let status = if non_compliant_count > 0 {
        let has_high = statuses.iter().any(|s| {
            s.status == RequirementStatus::NonCompliant && s.severity == Severity::High
        });
        if has_high {
            OverallCompliance::NonCompliant
        } else {
            OverallCompliance::AtRisk
        }
    } else if Decimal::from(pending_count)
        > settings.pending_at_risk_ratio * Decimal::from(total_requirements)
    {
        OverallCompliance::AtRisk
    } else {
        OverallCompliance::Compliant
    };

    ComplianceSummary {
        grant_id: grant_id.to_string(),
        evaluated_on,
        total_requirements,
        compliant_count,
        non_compliant_count,
        pending_count,
        not_applicable_count,
        issues_by_severity,
        compliance_rate,
        status,
        requirements: statuses,
    }
}

/// Evaluates a grant against a requirement set at `as_of`.
///
/// Never fails: missing parameters fall back to the defaults in `settings`.
///
/// # Examples
///
/// ```
/// use grant_metrics::calculation::assess_compliance;
/// use grant_metrics::config::ComplianceSettings;
/// use grant_metrics::models::{Grant, OverallCompliance};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let grant = Grant::new(
///     "grant_001",
///     "Community Literacy",
///     Decimal::new(100_000, 0),
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
/// );
/// let as_of = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
/// let summary = assess_compliance(&grant, &[], as_of, &ComplianceSettings::default());
///
/// assert_eq!(summary.compliance_rate, Decimal::ONE);
/// assert_eq!(summary.status, OverallCompliance::Compliant);
/// ```
pub fn assess_compliance(
    grant: &Grant,
    requirements: &[ComplianceRequirement],
    as_of: NaiveDate,
    settings: &ComplianceSettings,
) -> ComplianceSummary {
    let statuses = requirements
        .iter()
        .map(|requirement| evaluate_requirement(grant, requirement, as_of, settings))
        .collect();

    let summary = summarize_compliance(grant.id(), as_of, statuses, settings);

    debug!(
        grant_id = %grant.id(),
        %as_of,
        total = summary.total_requirements,
        compliant = summary.compliant_count,
        non_compliant = summary.non_compliant_count,
        pending = summary.pending_count,
        status = ?summary.status,
        "Assessed grant compliance"
    );

    summary
}
