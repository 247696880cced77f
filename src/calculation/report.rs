//! Per-grant report assembly.
//!
//! Combines the progress calculator and the compliance evaluator with
//! financial, milestone and KPI breakdowns into one report payload.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::{ComplianceSettings, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ComplianceRequirement, ExpenditureStatus, FinancialSummary, Grant, GrantReport, KpiSummary,
    MilestoneStatus, MilestoneSummary,
};

use super::{assess_compliance, calculate_progress, calculate_utilization};

/// Summarizes spending for a grant.
///
/// Totals beyond the decimal range yield [`EngineError::InvalidGrant`].
pub fn summarize_financials(grant: &Grant) -> EngineResult<FinancialSummary> {
    let out_of_range = |what: &str| EngineError::InvalidGrant {
        grant_id: grant.id().to_string(),
        message: format!("{} exceeds the supported range", what),
    };
    let utilization = calculate_utilization(grant)?;
    let total_funding = grant.total_funding();

    Ok(FinancialSummary {
        total_funding,
        awarded_amount: grant.awarded_amount(),
        gross_spend: utilization.funds_utilized,
        approved_spend: utilization.approved_funds,
        pending_spend: grant
            .spend_with_status(ExpenditureStatus::Pending)
            .ok_or_else(|| out_of_range("pending expenditure total"))?,
        rejected_spend: grant
            .spend_with_status(ExpenditureStatus::Rejected)
            .ok_or_else(|| out_of_range("rejected expenditure total"))?,
        remaining_funds: total_funding
            .checked_sub(utilization.approved_funds)
            .ok_or_else(|| out_of_range("remaining funds"))?,
        gross_utilization: utilization.gross,
        approved_utilization: utilization.approved,
    })
}

/// Counts milestones by status, and those overdue at `as_of`.
pub fn summarize_milestones(grant: &Grant, as_of: NaiveDate) -> MilestoneSummary {
    let mut summary = MilestoneSummary::default();

    for milestone in grant.milestones() {
        summary.total += 1;
        match milestone.status {
            MilestoneStatus::Pending => summary.pending += 1,
            MilestoneStatus::InProgress => summary.in_progress += 1,
            MilestoneStatus::Completed => summary.completed += 1,
            MilestoneStatus::Delayed => summary.delayed += 1,
        }
        if milestone.is_overdue(as_of) {
            summary.overdue += 1;
        }
    }

    summary
}

/// Reports each KPI's achievement against the configured minimum.
pub fn summarize_kpis(grant: &Grant, settings: &ComplianceSettings) -> EngineResult<Vec<KpiSummary>> {
    grant
        .kpis()
        .iter()
        .map(|kpi| {
            let achievement = kpi.achievement().ok_or_else(|| EngineError::InvalidGrant {
                grant_id: grant.id().to_string(),
                message: format!("KPI '{}' achievement exceeds the supported range", kpi.name),
            })?;
            Ok(KpiSummary {
                name: kpi.name.clone(),
                target_value: kpi.target_value,
                current_value: kpi.current_value,
                achievement,
                on_track: kpi.target_value.is_zero()
                    || achievement >= settings.default_min_achievement_rate,
            })
        })
        .collect()
}

/// Builds the full report for a grant at `as_of`.
///
/// With `requirements` of `None` the grant's own compliance requirements are
/// evaluated; `Some(&[])` evaluates nothing. Fails only when progress cannot
/// be calculated for an invalid grant.
pub fn build_grant_report(
    grant: &Grant,
    requirements: Option<&[ComplianceRequirement]>,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<GrantReport> {
    let progress = calculate_progress(grant, as_of, &config.risk)?;

    let requirements = requirements.unwrap_or(grant.compliance_requirements());
    let compliance = assess_compliance(grant, requirements, as_of, &config.compliance);

    let report = GrantReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        as_of,
        grant_id: grant.id().to_string(),
        grant_name: grant.name().to_string(),
        grant_status: grant.status(),
        grant_version: grant.version(),
        financial: summarize_financials(grant)?,
        milestones: summarize_milestones(grant, as_of),
        kpis: summarize_kpis(grant, &config.compliance)?,
        progress,
        compliance,
    };

    info!(
        report_id = %report.report_id,
        grant_id = %report.grant_id,
        risk_level = ?report.progress.risk_level,
        compliance_status = ?report.compliance.status,
        "Built grant report"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Expenditure, Kpi, Milestone, OverallCompliance, RequirementParameters, RequirementType,
        RiskLevel, Severity,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn milestone(id: &str, due: NaiveDate, status: MilestoneStatus) -> Milestone {
        Milestone {
            id: id.to_string(),
            title: format!("Milestone {}", id),
            due_date: due,
            completion_date: None,
            status,
            dependencies: vec![],
        }
    }

    fn expenditure(id: &str, amount: &str, status: ExpenditureStatus) -> Expenditure {
        Expenditure {
            id: id.to_string(),
            amount: dec(amount),
            category: "operations".to_string(),
            date: date(2023, 3, 1),
            status,
        }
    }

    fn kpi(name: &str, target: &str, current: &str) -> Kpi {
        Kpi {
            id: format!("kpi_{}", name),
            name: name.to_string(),
            target_value: dec(target),
            current_value: dec(current),
            unit: None,
        }
    }

    fn financial_requirement(max_rate: &str) -> ComplianceRequirement {
        ComplianceRequirement {
            id: "req_fin".to_string(),
            name: "Budget ceiling".to_string(),
            requirement_type: RequirementType::Financial,
            severity: Severity::High,
            applicable_from: None,
            due_date: None,
            parameters: RequirementParameters::new().with("max_utilization_rate", max_rate),
        }
    }

    fn create_grant() -> Grant {
        Grant::new(
            "grant_001",
            "Community Literacy",
            dec("100000"),
            date(2023, 1, 1),
            date(2023, 12, 31),
        )
        .with_milestones(vec![
            milestone("m1", date(2023, 3, 31), MilestoneStatus::Completed),
            milestone("m2", date(2023, 5, 31), MilestoneStatus::InProgress),
            milestone("m3", date(2023, 9, 30), MilestoneStatus::Pending),
            milestone("m4", date(2023, 4, 30), MilestoneStatus::Delayed),
        ])
        .with_expenditures(vec![
            expenditure("e1", "30000", ExpenditureStatus::Approved),
            expenditure("e2", "10000", ExpenditureStatus::Pending),
            expenditure("e3", "5000", ExpenditureStatus::Rejected),
        ])
        .with_kpis(vec![kpi("participants", "200", "150"), kpi("events", "0", "4")])
        .with_compliance_requirements(vec![financial_requirement("0.4")])
    }

    #[test]
    fn test_financial_summary() {
        let summary = summarize_financials(&create_grant()).unwrap();

        assert_eq!(summary.gross_spend, dec("45000"));
        assert_eq!(summary.approved_spend, dec("30000"));
        assert_eq!(summary.pending_spend, dec("10000"));
        assert_eq!(summary.rejected_spend, dec("5000"));
        assert_eq!(summary.remaining_funds, dec("70000"));
        assert_eq!(summary.gross_utilization, dec("0.45"));
        assert_eq!(summary.approved_utilization, dec("0.3"));
    }

    #[test]
    fn test_milestone_summary_counts_overdue() {
        let summary = summarize_milestones(&create_grant(), date(2023, 6, 30));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.delayed, 1);
        // m2 and m4 are past due and not completed
        assert_eq!(summary.overdue, 2);
    }

    #[test]
    fn test_kpi_summary_on_track() {
        let kpis = summarize_kpis(&create_grant(), &ComplianceSettings::default()).unwrap();

        assert_eq!(kpis.len(), 2);
        assert_eq!(kpis[0].achievement, dec("0.75"));
        assert!(!kpis[0].on_track);
        assert!(kpis[1].on_track);
    }

    #[test]
    fn test_report_uses_grant_requirements_when_none_given() {
        let grant = create_grant();
        let report =
            build_grant_report(&grant, None, date(2023, 6, 30), &EngineConfig::default()).unwrap();

        assert_eq!(report.grant_id, "grant_001");
        assert_eq!(report.grant_version, 1);
        assert_eq!(report.compliance.total_requirements, 1);
        // gross 0.45 exceeds the grant's own 0.4 ceiling
        assert_eq!(report.compliance.status, OverallCompliance::NonCompliant);
        assert_eq!(report.progress.utilization_rate, dec("0.3"));
        assert_eq!(report.milestones.overdue, 2);
    }

    #[test]
    fn test_report_prefers_explicit_requirements() {
        let grant = create_grant();
        let report = build_grant_report(
            &grant,
            Some(&[financial_requirement("0.5")]),
            date(2023, 6, 30),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(report.compliance.status, OverallCompliance::Compliant);
        assert_eq!(report.progress.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_report_fails_for_invalid_grant() {
        let grant = Grant::new(
            "grant_bad",
            "Inverted",
            dec("1000"),
            date(2023, 12, 31),
            date(2023, 1, 1),
        );
        let result = build_grant_report(&grant, None, date(2023, 6, 30), &EngineConfig::default());
        assert!(matches!(result, Err(EngineError::InvalidGrant { .. })));
    }

    #[test]
    fn test_explicit_empty_requirements_evaluate_nothing() {
        let grant = create_grant();
        let report =
            build_grant_report(&grant, Some(&[]), date(2023, 6, 30), &EngineConfig::default())
                .unwrap();

        assert_eq!(report.compliance.total_requirements, 0);
        assert_eq!(report.compliance.status, OverallCompliance::Compliant);
    }

    #[test]
    fn test_financial_summary_overflow_is_invalid() {
        let grant = create_grant().with_expenditures(vec![
            expenditure("e1", "79228162514264337593543950335", ExpenditureStatus::Approved),
            expenditure("e2", "1", ExpenditureStatus::Pending),
        ]);
        assert!(matches!(
            summarize_financials(&grant),
            Err(EngineError::InvalidGrant { .. })
        ));
    }
}
