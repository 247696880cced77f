//! Documentation requirement evaluation.
//!
//! Every document type listed under `required_documents` needs an approved
//! submitted document of that type.

use crate::models::{ComplianceRequirement, Grant, RequirementStatus};

use super::RuleOutcome;

/// Evaluates a documentation requirement.
///
/// Checks required types in order and stops at the first one without an
/// approved document. An empty or absent list is vacuously compliant.
pub fn evaluate_documentation(grant: &Grant, requirement: &ComplianceRequirement) -> RuleOutcome {
    let required = requirement.parameters.required_documents();
    let mut evidence = Vec::with_capacity(required.len() + 1);

    if required.is_empty() {
        evidence.push("No required documents specified".to_string());
        return RuleOutcome::new(RequirementStatus::Compliant, evidence);
    }

    for document_type in required {
        let approved = grant.documents().iter().any(|d| d.satisfies(document_type));
        if !approved {
            evidence.push(format!(
                "Required document '{}' missing or not approved",
                document_type
            ));
            return RuleOutcome::new(RequirementStatus::NonCompliant, evidence);
        }
        evidence.push(format!("Required document '{}' approved", document_type));
    }

    RuleOutcome::new(RequirementStatus::Compliant, evidence)
}
