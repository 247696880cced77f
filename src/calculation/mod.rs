//! Calculation logic for the grant metrics engine.
//!
//! This module contains the progress calculator (timeline, utilization,
//! milestone completion, KPI achievement and risk classification), the
//! compliance evaluator with one module per requirement type, and the report
//! and dashboard assembly built on top of both. Every function here is a
//! pure computation over an immutable grant snapshot and an explicit
//! evaluation date.

mod compliance;
mod dashboard;
mod documentation_rule;
mod financial_rule;
mod performance_rule;
mod progress;
mod report;
mod reporting_rule;
mod risk;
mod timeline;
mod utilization;

pub use compliance::{RuleOutcome, assess_compliance, evaluate_requirement, summarize_compliance};
pub use dashboard::build_dashboard;
pub use documentation_rule::evaluate_documentation;
pub use financial_rule::evaluate_financial;
pub use performance_rule::evaluate_performance;
pub use progress::{calculate_progress, kpi_achievements, milestone_completion_rate};
pub use report::{build_grant_report, summarize_financials, summarize_kpis, summarize_milestones};
pub use reporting_rule::evaluate_reporting;
pub use risk::{RiskAssessment, classify_risk};
pub use timeline::{TimelineProgress, calculate_timeline};
pub use utilization::{Utilization, calculate_utilization, utilization_ratio};
