//! Compliance requirement and evaluation result models.
//!
//! [`ComplianceRequirement`] is input data. [`ComplianceStatus`] and
//! [`ComplianceSummary`] are derived per evaluation call and never stored
//! on the grant.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// What a compliance requirement checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    /// Required documents have been submitted and approved.
    Documentation,
    /// Spending stays within a utilization ceiling.
    Financial,
    /// A report was submitted by its due date.
    Reporting,
    /// KPIs meet a minimum achievement rate.
    Performance,
    /// Any type this evaluator does not understand.
    #[serde(other)]
    Unrecognized,
}

/// How serious a breach of a requirement is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A breach makes the whole grant non-compliant.
    High,
    /// A breach puts the grant at risk.
    Medium,
    /// A breach puts the grant at risk.
    Low,
}

/// Free-form parameters attached to a requirement.
///
/// The recognized keys depend on the requirement type. Accessors return
/// `None` for missing or wrongly typed values so callers can fall back to
/// their defaults; anything other than a JSON object deserializes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequirementParameters(Map<String, Value>);

impl RequirementParameters {
    /// Key listing the document types a documentation requirement needs.
    pub const REQUIRED_DOCUMENTS: &'static str = "required_documents";
    /// Key for the utilization ceiling of a financial requirement.
    pub const MAX_UTILIZATION_RATE: &'static str = "max_utilization_rate";
    /// Key for the report type a reporting requirement expects.
    pub const REPORT_TYPE: &'static str = "report_type";
    /// Key for the achievement floor of a performance requirement.
    pub const MIN_ACHIEVEMENT_RATE: &'static str = "min_achievement_rate";

    /// Creates an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bag with `key` set to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use grant_metrics::models::RequirementParameters;
    /// use rust_decimal::Decimal;
    ///
    /// let params = RequirementParameters::new().with("max_utilization_rate", "0.9");
    /// assert_eq!(params.max_utilization_rate(), Some(Decimal::new(9, 1)));
    /// ```
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Reads a decimal from a JSON number or a numeric string.
    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        let text = match self.0.get(key)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => return None,
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    /// Reads a string value.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }

    /// Reads an array of strings, skipping non-string entries.
    pub fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        let items = self.0.get(key)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }

    /// Document types required by a documentation requirement.
    pub fn required_documents(&self) -> Vec<&str> {
        self.string_list(Self::REQUIRED_DOCUMENTS).unwrap_or_default()
    }

    /// Utilization ceiling of a financial requirement, if set.
    pub fn max_utilization_rate(&self) -> Option<Decimal> {
        self.decimal(Self::MAX_UTILIZATION_RATE)
    }

    /// Report type expected by a reporting requirement, if set.
    pub fn report_type(&self) -> Option<&str> {
        self.string(Self::REPORT_TYPE)
    }

    /// Achievement floor of a performance requirement, if set.
    pub fn min_achievement_rate(&self) -> Option<Decimal> {
        self.decimal(Self::MIN_ACHIEVEMENT_RATE)
    }
}

impl<'de> Deserialize<'de> for RequirementParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self::default()),
        }
    }
}

/// A rule a grant must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRequirement {
    /// Unique identifier for the requirement.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What the requirement checks.
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    /// How serious a breach is.
    pub severity: Severity,
    /// The requirement is not applicable before this date.
    #[serde(default)]
    pub applicable_from: Option<NaiveDate>,
    /// Deadline, used by reporting requirements.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Type-specific parameters.
    #[serde(default)]
    pub parameters: RequirementParameters,
}

/// Outcome of evaluating one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    /// The requirement is satisfied.
    Compliant,
    /// The requirement is breached.
    NonCompliant,
    /// The requirement could not be decided.
    Pending,
    /// The requirement does not apply yet.
    NotApplicable,
}

/// Result of evaluating one requirement against one grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    /// The requirement evaluated.
    pub requirement_id: String,
    /// The requirement's name.
    pub requirement_name: String,
    /// The requirement's type.
    pub requirement_type: RequirementType,
    /// The outcome.
    pub status: RequirementStatus,
    /// What was checked, in the order the checks ran.
    pub evidence: Vec<String>,
    /// Copied from the requirement.
    pub severity: Severity,
    /// Copied from the requirement.
    pub due_date: Option<NaiveDate>,
}

/// Non-compliant requirement counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// High severity issues.
    pub high: u32,
    /// Medium severity issues.
    pub medium: u32,
    /// Low severity issues.
    pub low: u32,
}

impl SeverityCounts {
    /// Increments the counter for `severity`.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Aggregate compliance standing of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallCompliance {
    /// Nothing breached and few requirements undecided.
    Compliant,
    /// Only medium/low breaches, or too many undecided requirements.
    AtRisk,
    /// At least one high severity breach.
    NonCompliant,
}

/// Aggregate of all requirement outcomes for one grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// The grant evaluated.
    pub grant_id: String,
    /// The evaluation date.
    pub evaluated_on: NaiveDate,
    /// Number of requirements evaluated.
    pub total_requirements: u32,
    /// Requirements found compliant.
    pub compliant_count: u32,
    /// Requirements found non-compliant.
    pub non_compliant_count: u32,
    /// Requirements left pending.
    pub pending_count: u32,
    /// Requirements not yet applicable.
    pub not_applicable_count: u32,
    /// Non-compliant requirements by severity.
    pub issues_by_severity: SeverityCounts,
    /// Compliant share of all requirements; 1 when there are none.
    pub compliance_rate: Decimal,
    /// Overall standing.
    pub status: OverallCompliance,
    /// Per-requirement outcomes in input order.
    pub requirements: Vec<ComplianceStatus>,
}
