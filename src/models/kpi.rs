//! Key performance indicator model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named metric with a target and a current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Unique identifier for the KPI.
    pub id: String,
    /// Display name; used as the key in achievement maps.
    pub name: String,
    /// The value the grant aims to reach.
    pub target_value: Decimal,
    /// The value reached so far.
    pub current_value: Decimal,
    /// Optional unit of measure (e.g. "participants").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Kpi {
    /// Returns the achievement ratio of current to target value.
    ///
    /// A zero target has no meaningful ratio, so the current value itself is
    /// returned instead. `None` when the ratio exceeds the decimal range,
    /// which happens with a tiny target and a large current value.
    ///
    /// # Examples
    ///
    /// ```
    /// use grant_metrics::models::Kpi;
    /// use rust_decimal::Decimal;
    ///
    /// let kpi = Kpi {
    ///     id: "kpi_001".to_string(),
    ///     name: "Participants".to_string(),
    ///     target_value: Decimal::new(200, 0),
    ///     current_value: Decimal::new(150, 0),
    ///     unit: None,
    /// };
    /// assert_eq!(kpi.achievement(), Some(Decimal::new(75, 2)));
    /// ```
    pub fn achievement(&self) -> Option<Decimal> {
        if self.target_value.is_zero() {
            Some(self.current_value)
        } else {
            self.current_value.checked_div(self.target_value)
        }
    }
}
