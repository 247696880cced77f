//! Reporting requirement evaluation.
//!
//! A report of the configured type must be submitted on or before the due
//! date. The check runs only once the due date has passed; before that, or
//! with no due date at all, the requirement counts as compliant. That default
//! is deliberate: changing it to pending would change audit outcomes.

use chrono::NaiveDate;

use crate::config::ComplianceSettings;
use crate::models::{ComplianceRequirement, Grant, RequirementStatus};

use super::RuleOutcome;

/// Evaluates a reporting requirement at `as_of`.
pub fn evaluate_reporting(
    grant: &Grant,
    requirement: &ComplianceRequirement,
    as_of: NaiveDate,
    settings: &ComplianceSettings,
) -> RuleOutcome {
    let report_type = requirement
        .parameters
        .report_type()
        .unwrap_or(settings.default_report_type.as_str());

    let due_date = match requirement.due_date {
        Some(due_date) if as_of > due_date => due_date,
        Some(due_date) => {
            return RuleOutcome::new(
                RequirementStatus::Compliant,
                vec![format!(
                    "Report '{}' not yet due (due {})",
                    report_type, due_date
                )],
            );
        }
        None => {
            return RuleOutcome::new(
                RequirementStatus::Compliant,
                vec![format!("No due date set for report '{}'", report_type)],
            );
        }
    };

    let submission = grant
        .report_submissions()
        .iter()
        .filter(|r| r.report_type == report_type && r.submitted_at <= due_date)
        .min_by_key(|r| r.submitted_at);

    match submission {
        Some(report) => RuleOutcome::new(
            RequirementStatus::Compliant,
            vec![format!(
                "Report '{}' submitted on {} (due {})",
                report_type, report.submitted_at, due_date
            )],
        ),
        None => RuleOutcome::new(
            RequirementStatus::NonCompliant,
            vec![format!(
                "Required report '{}' not submitted by {}",
                report_type, due_date
            )],
        ),
    }
}
