//! Documents and report submissions filed against a grant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review state of a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by the reviewer.
    Approved,
    /// Returned to the grantee.
    Rejected,
}

/// A supporting document submitted for a grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The kind of document (e.g. "budget_plan", "audit_report").
    pub document_type: String,
    /// Review state.
    pub status: DocumentStatus,
    /// The date the document was submitted.
    pub submitted_at: NaiveDate,
}

impl Document {
    /// Returns true if this is an approved document of the given type.
    pub fn satisfies(&self, document_type: &str) -> bool {
        self.document_type == document_type && self.status == DocumentStatus::Approved
    }
}

/// A periodic report filed for a grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    /// Unique identifier for the submission.
    pub id: String,
    /// The kind of report (e.g. "progress", "financial").
    pub report_type: String,
    /// The date the report was submitted.
    pub submitted_at: NaiveDate,
}
