//! Core data models for the grant metrics engine.
//!
//! The grant aggregate and the records it owns are input snapshots; progress,
//! compliance and report records are derived per calculation call.

mod compliance;
mod expenditure;
mod grant;
mod kpi;
mod milestone;
mod progress;
mod report;
mod submission;

pub use compliance::{
    ComplianceRequirement, ComplianceStatus, ComplianceSummary, OverallCompliance,
    RequirementParameters, RequirementStatus, RequirementType, Severity, SeverityCounts,
};
pub use expenditure::{Expenditure, ExpenditureStatus};
pub use grant::{Grant, GrantEvent, GrantStatus};
pub use kpi::Kpi;
pub use milestone::{Milestone, MilestoneStatus};
pub use progress::{GrantProgressMetrics, RiskLevel};
pub use report::{
    ComplianceDistribution, DashboardFailure, DashboardGrant, DashboardSummary, FinancialSummary,
    GrantReport, KpiSummary, MilestoneSummary, RiskDistribution,
};
pub use submission::{Document, DocumentStatus, ReportSubmission};
