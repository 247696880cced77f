//! Financial requirement evaluation.
//!
//! Compares gross utilization (every expenditure, approved or not) against
//! the requirement's `max_utilization_rate`.

use rust_decimal::Decimal;

use crate::config::ComplianceSettings;
use crate::models::{ComplianceRequirement, Grant, RequirementStatus};

use super::{RuleOutcome, utilization_ratio};

/// Evaluates a financial requirement.
///
/// Figures that cannot be computed (negative funding, totals or ratios
/// beyond the decimal range) leave the requirement pending.
pub fn evaluate_financial(
    grant: &Grant,
    requirement: &ComplianceRequirement,
    settings: &ComplianceSettings,
) -> RuleOutcome {
    let max_rate = requirement
        .parameters
        .max_utilization_rate()
        .unwrap_or(settings.default_max_utilization_rate);
    let total_funding = grant.total_funding();

    if total_funding < Decimal::ZERO {
        return RuleOutcome::new(
            RequirementStatus::Pending,
            vec![format!(
                "Total funding {} is negative; utilization cannot be evaluated",
                total_funding.normalize()
            )],
        );
    }

    let Some(gross_spend) = grant.gross_spend() else {
        return RuleOutcome::new(
            RequirementStatus::Pending,
            vec!["Gross spend exceeds the supported range".to_string()],
        );
    };

    let mut evidence = Vec::with_capacity(3);
    if total_funding.is_zero() {
        evidence.push("No total funding recorded; utilization treated as 0".to_string());
    }
    evidence.push(format!(
        "Gross spend {} against total funding {}",
        gross_spend.normalize(),
        total_funding.normalize()
    ));

    let Some(actual) = utilization_ratio(gross_spend, total_funding) else {
        evidence.push("Utilization rate exceeds the supported range".to_string());
        return RuleOutcome::new(RequirementStatus::Pending, evidence);
    };

    if actual > max_rate {
        evidence.push(format!(
            "Utilization rate {} exceeds maximum {}",
            actual.round_dp(4).normalize(),
            max_rate.normalize()
        ));
        RuleOutcome::new(RequirementStatus::NonCompliant, evidence)
    } else {
        evidence.push(format!(
            "Utilization rate {} within maximum {}",
            actual.round_dp(4).normalize(),
            max_rate.normalize()
        ));
        RuleOutcome::new(RequirementStatus::Compliant, evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Expenditure, ExpenditureStatus, RequirementParameters, RequirementType, Severity,
    };
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn expenditure(id: &str, amount: &str, status: ExpenditureStatus) -> Expenditure {
        Expenditure {
            id: id.to_string(),
            amount: dec(amount),
            category: "operations".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            status,
        }
    }

    fn create_grant(total_funding: &str, expenditures: Vec<Expenditure>) -> Grant {
        Grant::new(
            "grant_001",
            "Community Literacy",
            dec(total_funding),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .with_expenditures(expenditures)
    }

    fn requirement(parameters: RequirementParameters) -> ComplianceRequirement {
        ComplianceRequirement {
            id: "req_fin".to_string(),
            name: "Budget ceiling".to_string(),
            requirement_type: RequirementType::Financial,
            severity: Severity::High,
            applicable_from: None,
            due_date: None,
            parameters,
        }
    }

    #[test]
    fn test_gross_spend_over_ceiling_is_non_compliant() {
        let grant = create_grant(
            "100000",
            vec![
                expenditure("e1", "60000", ExpenditureStatus::Approved),
                expenditure("e2", "35000", ExpenditureStatus::Pending),
            ],
        );
        let requirement =
            requirement(RequirementParameters::new().with("max_utilization_rate", 0.9));

        let outcome = evaluate_financial(&grant, &requirement, &ComplianceSettings::default());

        assert_eq!(outcome.status, RequirementStatus::NonCompliant);
        let last = outcome.evidence.last().unwrap();
        assert!(last.contains("0.95"), "evidence: {}", last);
        assert!(last.contains("0.9"), "evidence: {}", last);
        assert!(last.contains("exceeds"));
    }

    #[test]
    fn test_within_ceiling_is_compliant() {
        let grant = create_grant("100000", vec![expenditure("e1", "90000", ExpenditureStatus::Approved)]);
        let requirement =
            requirement(RequirementParameters::new().with("max_utilization_rate", "0.9"));

        let outcome = evaluate_financial(&grant, &requirement, &ComplianceSettings::default());
        assert_eq!(outcome.status, RequirementStatus::Compliant);
    }

    #[test]
    fn test_default_ceiling_is_full_funding() {
        let grant = create_grant(
            "100000",
            vec![expenditure("e1", "100001", ExpenditureStatus::Rejected)],
        );
        let outcome = evaluate_financial(
            &grant,
            &requirement(RequirementParameters::new()),
            &ComplianceSettings::default(),
        );
        assert_eq!(outcome.status, RequirementStatus::NonCompliant);
    }

    #[test]
    fn test_zero_funding_is_noted_and_compliant() {
        let grant = create_grant("0", vec![expenditure("e1", "10", ExpenditureStatus::Approved)]);
        let outcome = evaluate_financial(
            &grant,
            &requirement(RequirementParameters::new()),
            &ComplianceSettings::default(),
        );
        assert_eq!(outcome.status, RequirementStatus::Compliant);
        assert!(outcome.evidence[0].contains("No total funding"));
    }

    #[test]
    fn test_negative_funding_is_pending() {
        let grant = create_grant(
            "-100000",
            vec![expenditure("e1", "500000", ExpenditureStatus::Approved)],
        );
        let requirement =
            requirement(RequirementParameters::new().with("max_utilization_rate", 0.9));

        let outcome = evaluate_financial(&grant, &requirement, &ComplianceSettings::default());

        assert_eq!(outcome.status, RequirementStatus::Pending);
        assert!(outcome.evidence[0].contains("negative"));
    }

    #[test]
    fn test_tiny_funding_is_pending_not_a_panic() {
        let grant = create_grant(
            "0.0000000000000000000000000001",
            vec![expenditure("e1", "1000000", ExpenditureStatus::Approved)],
        );
        assert_eq!(grant.total_funding(), Decimal::new(1, 28));

        let outcome = evaluate_financial(
            &grant,
            &requirement(RequirementParameters::new()),
            &ComplianceSettings::default(),
        );

        assert_eq!(outcome.status, RequirementStatus::Pending);
        assert!(outcome.evidence.last().unwrap().contains("supported range"));
    }

    #[test]
    fn test_spend_overflow_is_pending() {
        let grant = create_grant(
            "100000",
            vec![
                expenditure("e1", "79228162514264337593543950335", ExpenditureStatus::Approved),
                expenditure("e2", "1", ExpenditureStatus::Pending),
            ],
        );
        let outcome = evaluate_financial(
            &grant,
            &requirement(RequirementParameters::new()),
            &ComplianceSettings::default(),
        );

        assert_eq!(outcome.status, RequirementStatus::Pending);
    }
}
