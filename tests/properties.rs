//! Property tests for the progress and compliance calculators.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use grant_metrics::calculation::{assess_compliance, calculate_progress, classify_risk, evaluate_documentation};
use grant_metrics::config::{ComplianceSettings, RiskSettings};
use grant_metrics::models::{
    ComplianceRequirement, Document, DocumentStatus, Expenditure, ExpenditureStatus, Grant,
    OverallCompliance, RequirementParameters, RequirementStatus, RequirementType, Severity,
};

const DOCUMENT_TYPES: [&str; 4] = ["budget_plan", "audit_report", "ethics_approval", "insurance"];

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn grant(total_funding: Decimal, length_days: u64) -> Grant {
    Grant::new(
        "grant_prop",
        "Property Grant",
        total_funding,
        start(),
        start() + Days::new(length_days),
    )
}

fn expenditure_strategy() -> impl Strategy<Value = Expenditure> {
    (0i64..10_000_000, any::<bool>()).prop_map(|(cents, approved)| Expenditure {
        id: format!("exp_{}", cents),
        amount: Decimal::new(cents, 2),
        category: "program".to_string(),
        date: start(),
        status: if approved {
            ExpenditureStatus::Approved
        } else {
            ExpenditureStatus::Pending
        },
    })
}

/// A ratio in [0, 1] with four decimal places.
fn ratio_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|n| Decimal::new(n, 4))
}

fn documentation_requirement(required: &[&str]) -> ComplianceRequirement {
    ComplianceRequirement {
        id: "req_docs".to_string(),
        name: "Supporting documents".to_string(),
        requirement_type: RequirementType::Documentation,
        severity: Severity::Medium,
        applicable_from: None,
        due_date: None,
        parameters: RequirementParameters::new()
            .with(RequirementParameters::REQUIRED_DOCUMENTS, required.to_vec()),
    }
}

fn approved_document(document_type: &str) -> Document {
    Document {
        id: format!("doc_{}", document_type),
        document_type: document_type.to_string(),
        status: DocumentStatus::Approved,
        submitted_at: start(),
    }
}

fn status_rank(status: RequirementStatus) -> u8 {
    match status {
        RequirementStatus::NonCompliant => 0,
        RequirementStatus::Pending | RequirementStatus::NotApplicable => 1,
        RequirementStatus::Compliant => 2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn zero_funding_never_divides(
        expenditures in prop::collection::vec(expenditure_strategy(), 0..10),
        offset in 0u64..500,
    ) {
        let grant = grant(Decimal::ZERO, 364).with_expenditures(expenditures);
        let metrics = calculate_progress(&grant, start() + Days::new(offset), &RiskSettings::default())
            .unwrap();

        prop_assert_eq!(metrics.gross_utilization, Decimal::ZERO);
        prop_assert_eq!(metrics.approved_utilization, Decimal::ZERO);
        prop_assert_eq!(metrics.utilization_rate, Decimal::ZERO);
    }

    #[test]
    fn zero_milestones_use_zero_completion(
        funding in 1i64..10_000_000,
        expenditures in prop::collection::vec(expenditure_strategy(), 0..10),
        length in 1u64..2000,
        offset in 0u64..2500,
    ) {
        let grant = grant(Decimal::new(funding, 0), length).with_expenditures(expenditures);
        let metrics = calculate_progress(&grant, start() + Days::new(offset), &RiskSettings::default())
            .unwrap();

        prop_assert_eq!(metrics.milestone_completion_rate, Decimal::ZERO);
        let expected = (metrics.timeline_progress
            + (metrics.timeline_progress - metrics.utilization_rate).abs())
            / Decimal::TWO;
        prop_assert_eq!(metrics.risk_score, expected);
    }

    #[test]
    fn timeline_progress_stays_in_unit_interval(
        length in 1u64..5000,
        offset in 0u64..10_000,
        before_start in any::<bool>(),
    ) {
        let grant = grant(Decimal::new(1000, 0), length);
        let as_of = if before_start {
            start() - Days::new(offset)
        } else {
            start() + Days::new(offset)
        };
        let metrics = calculate_progress(&grant, as_of, &RiskSettings::default()).unwrap();

        prop_assert!(metrics.timeline_progress >= Decimal::ZERO);
        prop_assert!(metrics.timeline_progress <= Decimal::ONE);
        prop_assert!(metrics.elapsed_days <= metrics.total_days);
    }

    #[test]
    fn risk_is_a_function_of_its_inputs(
        timeline in ratio_strategy(),
        utilization in ratio_strategy(),
        milestones in ratio_strategy(),
    ) {
        let settings = RiskSettings::default();
        let first = classify_risk(timeline, utilization, milestones, &settings);
        let second = classify_risk(timeline, utilization, milestones, &settings.clone());

        prop_assert_eq!(first, second);
        prop_assert!(first.score >= Decimal::ZERO);
    }

    #[test]
    fn empty_requirements_are_compliant(offset in 0u64..1000) {
        let grant = grant(Decimal::new(5000, 0), 364);
        let summary = assess_compliance(
            &grant,
            &[],
            start() + Days::new(offset),
            &ComplianceSettings::default(),
        );

        prop_assert_eq!(summary.compliance_rate, Decimal::ONE);
        prop_assert_eq!(summary.status, OverallCompliance::Compliant);
    }

    #[test]
    fn adding_approved_document_never_worsens_documentation(
        required in prop::sample::subsequence(DOCUMENT_TYPES.to_vec(), 0..=4),
        submitted in prop::sample::subsequence(DOCUMENT_TYPES.to_vec(), 0..=4),
        added in prop::sample::select(DOCUMENT_TYPES.to_vec()),
    ) {
        let requirement = documentation_requirement(&required);
        let documents: Vec<Document> = submitted.iter().map(|t| approved_document(t)).collect();

        let before = grant(Decimal::new(5000, 0), 364).with_documents(documents.clone());
        let mut extended = documents;
        extended.push(approved_document(added));
        let after = grant(Decimal::new(5000, 0), 364).with_documents(extended);

        let before_status = evaluate_documentation(&before, &requirement).status;
        let after_status = evaluate_documentation(&after, &requirement).status;

        prop_assert!(status_rank(after_status) >= status_rank(before_status));
    }
}
