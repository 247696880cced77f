//! Configuration types for grant evaluation.
//!
//! These structures are deserialized from the engine YAML file. Every field
//! has a default, so a partial file (or no file) is valid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which expenditures count as utilized funds for risk classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBasis {
    /// Only approved expenditures.
    #[default]
    Approved,
    /// All expenditures regardless of status.
    Gross,
}

/// Thresholds for the progress risk classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Risk scores strictly below this are low risk.
    pub low_threshold: Decimal,
    /// Risk scores strictly below this (and not low) are medium risk.
    pub medium_threshold: Decimal,
    /// Which utilization figure feeds the risk score.
    pub utilization_basis: UtilizationBasis,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            low_threshold: Decimal::new(20, 2),
            medium_threshold: Decimal::new(40, 2),
            utilization_basis: UtilizationBasis::Approved,
        }
    }
}

/// Defaults and aggregation thresholds for the compliance evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceSettings {
    /// Utilization ceiling for financial requirements without one.
    pub default_max_utilization_rate: Decimal,
    /// Achievement floor for performance requirements without one.
    pub default_min_achievement_rate: Decimal,
    /// Report type for reporting requirements without one.
    pub default_report_type: String,
    /// Share of pending requirements above which a grant is at risk.
    pub pending_at_risk_ratio: Decimal,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        Self {
            default_max_utilization_rate: Decimal::ONE,
            default_min_achievement_rate: Decimal::new(8, 1),
            default_report_type: "progress".to_string(),
            pending_at_risk_ratio: Decimal::new(3, 1),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Progress risk settings.
    pub risk: RiskSettings,
    /// Compliance evaluator settings.
    pub compliance: ComplianceSettings,
}
