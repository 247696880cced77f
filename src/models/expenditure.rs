//! Expenditure model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Approval state of an expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenditureStatus {
    /// Awaiting approval.
    Pending,
    /// Approved against the grant budget.
    Approved,
    /// Rejected.
    Rejected,
}

/// A recorded spend against a grant's budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expenditure {
    /// Unique identifier for the expenditure.
    pub id: String,
    /// The amount spent. Must not be negative.
    pub amount: Decimal,
    /// Budget category (e.g. "personnel", "equipment").
    #[serde(default)]
    pub category: String,
    /// The date the spend was recorded.
    pub date: NaiveDate,
    /// Approval state.
    pub status: ExpenditureStatus,
}

impl Expenditure {
    /// Returns true if the expenditure has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == ExpenditureStatus::Approved
    }
}
