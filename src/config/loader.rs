//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ComplianceSettings, EngineConfig, RiskSettings};

/// Loads and provides access to engine configuration.
///
/// # File Format
///
/// ```text
/// risk:
///   low_threshold: "0.20"
///   medium_threshold: "0.40"
///   utilization_basis: approved   # or gross
/// compliance:
///   default_max_utilization_rate: "1.0"
///   default_min_achievement_rate: "0.8"
///   default_report_type: progress
///   pending_at_risk_ratio: "0.3"
/// ```
///
/// # Example
///
/// ```no_run
/// use grant_metrics::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml")?;
/// println!("Low risk below {}", loader.risk().low_threshold);
/// # Ok::<(), grant_metrics::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid YAML or its thresholds are
    /// inconsistent.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    fn validate(config: &EngineConfig) -> Result<(), String> {
        let risk = &config.risk;
        if risk.low_threshold < Decimal::ZERO {
            return Err("risk.low_threshold cannot be negative".to_string());
        }
        if risk.low_threshold >= risk.medium_threshold {
            return Err(format!(
                "risk.low_threshold ({}) must be below risk.medium_threshold ({})",
                risk.low_threshold, risk.medium_threshold
            ));
        }

        let compliance = &config.compliance;
        let rates = [
            (
                "compliance.default_max_utilization_rate",
                compliance.default_max_utilization_rate,
            ),
            (
                "compliance.default_min_achievement_rate",
                compliance.default_min_achievement_rate,
            ),
            (
                "compliance.pending_at_risk_ratio",
                compliance.pending_at_risk_ratio,
            ),
        ];
        if let Some((name, _)) = rates.iter().find(|(_, value)| *value < Decimal::ZERO) {
            return Err(format!("{} cannot be negative", name));
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the progress risk settings.
    pub fn risk(&self) -> &RiskSettings {
        &self.config.risk
    }

    /// Returns the compliance evaluator settings.
    pub fn compliance(&self) -> &ComplianceSettings {
        &self.config.compliance
    }
}
