//! Grant aggregate and its audit history.
//!
//! A [`Grant`] owns its milestones, expenditures, KPIs, documents, report
//! submissions and compliance requirements. Fields are private: after
//! construction the grant changes only through its mutation methods, each of
//! which applies one change, bumps [`Grant::version`] by one and appends one
//! [`GrantEvent`] to the history, or returns an error and changes nothing.
//!
//! Mutation takes `&mut self`, so a single grant has a single writer at a
//! time. Callers sharing a grant between tasks must serialize writers
//! themselves, for example with one mutex per grant.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{EngineError, EngineResult};

use super::{
    ComplianceRequirement, Document, Expenditure, ExpenditureStatus, Kpi, Milestone,
    MilestoneStatus, ReportSubmission,
};

/// Lifecycle state of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// Being prepared; no funds released.
    Draft,
    /// Funded and running.
    Active,
    /// Temporarily halted.
    Suspended,
    /// All deliverables finished.
    Completed,
    /// Administratively closed.
    Closed,
}

/// One immutable entry in a grant's audit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantEvent {
    /// When the change was applied.
    pub timestamp: DateTime<Utc>,
    /// What kind of change was applied (e.g. "status_updated").
    pub action: String,
    /// Who applied the change.
    pub actor: String,
    /// Details of the change.
    pub changes: serde_json::Value,
}

fn initial_version() -> u64 {
    1
}

/// A funded program under progress and compliance tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    id: String,
    name: String,
    total_funding: Decimal,
    awarded_amount: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: GrantStatus,
    #[serde(default)]
    milestones: Vec<Milestone>,
    #[serde(default)]
    expenditures: Vec<Expenditure>,
    #[serde(default)]
    kpis: Vec<Kpi>,
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    report_submissions: Vec<ReportSubmission>,
    #[serde(default)]
    compliance_requirements: Vec<ComplianceRequirement>,
    #[serde(default = "initial_version")]
    version: u64,
    #[serde(default)]
    history: Vec<GrantEvent>,
}

impl Grant {
    /// Creates an active grant with no owned records.
    ///
    /// The awarded amount defaults to the total funding. The grant is not
    /// validated here; see [`Grant::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use grant_metrics::models::{Grant, GrantStatus};
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
    /// assert_eq!(grant.status(), GrantStatus::Active);
    /// assert_eq!(grant.version(), 1);
    /// assert!(grant.history().is_empty());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_funding: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_funding,
            awarded_amount: total_funding,
            start_date,
            end_date,
            status: GrantStatus::Active,
            milestones: Vec::new(),
            expenditures: Vec::new(),
            kpis: Vec::new(),
            documents: Vec::new(),
            report_submissions: Vec::new(),
            compliance_requirements: Vec::new(),
            version: initial_version(),
            history: Vec::new(),
        }
    }

    /// Sets the milestones.
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }

    /// Sets the expenditures.
    pub fn with_expenditures(mut self, expenditures: Vec<Expenditure>) -> Self {
        self.expenditures = expenditures;
        self
    }

    /// Sets the KPIs.
    pub fn with_kpis(mut self, kpis: Vec<Kpi>) -> Self {
        self.kpis = kpis;
        self
    }

    /// Sets the submitted documents.
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    /// Sets the report submissions.
    pub fn with_report_submissions(mut self, report_submissions: Vec<ReportSubmission>) -> Self {
        self.report_submissions = report_submissions;
        self
    }

    /// Sets the grant's own compliance requirements.
    pub fn with_compliance_requirements(
        mut self,
        compliance_requirements: Vec<ComplianceRequirement>,
    ) -> Self {
        self.compliance_requirements = compliance_requirements;
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total funding available.
    pub fn total_funding(&self) -> Decimal {
        self.total_funding
    }

    /// Amount awarded.
    pub fn awarded_amount(&self) -> Decimal {
        self.awarded_amount
    }

    /// First day of the grant period.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the grant period.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Current lifecycle state.
    pub fn status(&self) -> GrantStatus {
        self.status
    }

    /// Milestones owned by the grant.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Expenditures recorded against the grant.
    pub fn expenditures(&self) -> &[Expenditure] {
        &self.expenditures
    }

    /// KPIs tracked for the grant.
    pub fn kpis(&self) -> &[Kpi] {
        &self.kpis
    }

    /// Documents submitted for the grant.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Reports submitted for the grant.
    pub fn report_submissions(&self) -> &[ReportSubmission] {
        &self.report_submissions
    }

    /// Compliance requirements attached to the grant.
    pub fn compliance_requirements(&self) -> &[ComplianceRequirement] {
        &self.compliance_requirements
    }

    /// Monotonic revision counter, bumped once per mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Append-only audit history, oldest first.
    pub fn history(&self) -> &[GrantEvent] {
        &self.history
    }

    /// Sum of all expenditure amounts regardless of status.
    ///
    /// `None` when the total exceeds the decimal range.
    pub fn gross_spend(&self) -> Option<Decimal> {
        checked_total(self.expenditures.iter())
    }

    /// Sum of expenditure amounts with the given status, `None` on overflow.
    pub fn spend_with_status(&self, status: ExpenditureStatus) -> Option<Decimal> {
        checked_total(self.expenditures.iter().filter(|e| e.status == status))
    }

    /// Sum of approved expenditure amounts, `None` on overflow.
    pub fn approved_spend(&self) -> Option<Decimal> {
        checked_total(self.expenditures.iter().filter(|e| e.is_approved()))
    }

    /// Checks the structural invariants the calculators rely on.
    ///
    /// Returns [`EngineError::InvalidGrant`] when the end date is not after
    /// the start date, total funding is negative, any expenditure amount is
    /// negative, or the expenditures sum past the decimal range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date <= self.start_date {
            return Err(self.invalid(format!(
                "end date {} must be after start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.total_funding < Decimal::ZERO {
            return Err(self.invalid(format!(
                "total funding cannot be negative (got {})",
                self.total_funding
            )));
        }

        if let Some(expenditure) = self
            .expenditures
            .iter()
            .find(|e| e.amount < Decimal::ZERO)
        {
            return Err(self.invalid(format!(
                "expenditure '{}' has negative amount {}",
                expenditure.id, expenditure.amount
            )));
        }

        if self.gross_spend().is_none() {
            return Err(self.invalid("expenditure total exceeds the supported range".to_string()));
        }

        Ok(())
    }

    fn invalid(&self, message: String) -> EngineError {
        EngineError::InvalidGrant {
            grant_id: self.id.clone(),
            message,
        }
    }

    /// Bumps the version and appends one history entry.
    fn record(&mut self, action: &str, actor: &str, changes: serde_json::Value) {
        self.version += 1;
        self.history.push(GrantEvent {
            timestamp: Utc::now(),
            action: action.to_string(),
            actor: actor.to_string(),
            changes,
        });
    }

    /// Changes the grant's lifecycle status.
    pub fn update_status(&mut self, status: GrantStatus, actor: &str) {
        let previous = self.status;
        self.status = status;
        self.record(
            "status_updated",
            actor,
            json!({ "from": previous, "to": status }),
        );
    }

    /// Adds a milestone.
    pub fn add_milestone(&mut self, milestone: Milestone, actor: &str) {
        let changes = json!({ "milestone_id": milestone.id, "due_date": milestone.due_date });
        self.milestones.push(milestone);
        self.record("milestone_added", actor, changes);
    }

    /// Changes a milestone's status and completion date.
    pub fn update_milestone_status(
        &mut self,
        milestone_id: &str,
        status: MilestoneStatus,
        completion_date: Option<NaiveDate>,
        actor: &str,
    ) -> EngineResult<()> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| EngineError::EntityNotFound {
                entity: "Milestone",
                id: milestone_id.to_string(),
            })?;

        let previous = milestone.status;
        milestone.status = status;
        milestone.completion_date = completion_date;

        self.record(
            "milestone_status_updated",
            actor,
            json!({
                "milestone_id": milestone_id,
                "from": previous,
                "to": status,
                "completion_date": completion_date,
            }),
        );
        Ok(())
    }

    /// Records a new expenditure.
    pub fn add_expenditure(&mut self, expenditure: Expenditure, actor: &str) -> EngineResult<()> {
        if expenditure.amount < Decimal::ZERO {
            return Err(self.invalid(format!(
                "expenditure '{}' has negative amount {}",
                expenditure.id, expenditure.amount
            )));
        }
        let within_range = self
            .gross_spend()
            .and_then(|total| total.checked_add(expenditure.amount))
            .is_some();
        if !within_range {
            return Err(self.invalid(format!(
                "expenditure '{}' would push the total past the supported range",
                expenditure.id
            )));
        }

        let changes = json!({
            "expenditure_id": expenditure.id,
            "amount": expenditure.amount,
            "status": expenditure.status,
        });
        self.expenditures.push(expenditure);
        self.record("expenditure_added", actor, changes);
        Ok(())
    }

    /// Changes an expenditure's approval status.
    pub fn update_expenditure_status(
        &mut self,
        expenditure_id: &str,
        status: ExpenditureStatus,
        actor: &str,
    ) -> EngineResult<()> {
        let expenditure = self
            .expenditures
            .iter_mut()
            .find(|e| e.id == expenditure_id)
            .ok_or_else(|| EngineError::EntityNotFound {
                entity: "Expenditure",
                id: expenditure_id.to_string(),
            })?;

        let previous = expenditure.status;
        expenditure.status = status;

        self.record(
            "expenditure_status_updated",
            actor,
            json!({ "expenditure_id": expenditure_id, "from": previous, "to": status }),
        );
        Ok(())
    }

    /// Sets a KPI's current value.
    pub fn update_kpi_value(
        &mut self,
        kpi_id: &str,
        current_value: Decimal,
        actor: &str,
    ) -> EngineResult<()> {
        let kpi = self
            .kpis
            .iter_mut()
            .find(|k| k.id == kpi_id)
            .ok_or_else(|| EngineError::EntityNotFound {
                entity: "KPI",
                id: kpi_id.to_string(),
            })?;

        let previous = kpi.current_value;
        kpi.current_value = current_value;

        self.record(
            "kpi_value_updated",
            actor,
            json!({ "kpi_id": kpi_id, "from": previous, "to": current_value }),
        );
        Ok(())
    }

    /// Files a document.
    pub fn submit_document(&mut self, document: Document, actor: &str) {
        let changes = json!({
            "document_id": document.id,
            "document_type": document.document_type,
            "status": document.status,
        });
        self.documents.push(document);
        self.record("document_submitted", actor, changes);
    }

    /// Files a report.
    pub fn submit_report(&mut self, report: ReportSubmission, actor: &str) {
        let changes = json!({
            "report_id": report.id,
            "report_type": report.report_type,
            "submitted_at": report.submitted_at,
        });
        self.report_submissions.push(report);
        self.record("report_submitted", actor, changes);
    }
}

fn checked_total<'a>(mut expenditures: impl Iterator<Item = &'a Expenditure>) -> Option<Decimal> {
    expenditures.try_fold(Decimal::ZERO, |total, e| total.checked_add(e.amount))
}
