//! Request types for the grant metrics API.
//!
//! Grants arrive as complete snapshots; the API holds no storage of its own.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ComplianceRequirement, Grant};

/// Request body for `/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRequest {
    /// The grant snapshot to evaluate.
    pub grant: Grant,
    /// Evaluation date; today (UTC) when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for `/compliance` and `/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The grant snapshot to evaluate.
    pub grant: Grant,
    /// Requirements to evaluate; the grant's own set when omitted.
    #[serde(default)]
    pub requirements: Option<Vec<ComplianceRequirement>>,
    /// Evaluation date; today (UTC) when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl EvaluationRequest {
    /// Returns the explicit requirements, or the grant's own set.
    pub fn requirements(&self) -> &[ComplianceRequirement] {
        self.requirements
            .as_deref()
            .unwrap_or(self.grant.compliance_requirements())
    }
}

/// Request body for `/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// The grant snapshots to evaluate.
    pub grants: Vec<Grant>,
    /// Evaluation date; today (UTC) when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Resolves an optional evaluation date to today (UTC).
pub fn resolve_as_of(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}
