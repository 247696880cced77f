//! Configuration loading and management for the grant metrics engine.
//!
//! This module loads risk thresholds and compliance defaults from a YAML
//! file.
//!
//! # Example
//!
//! ```no_run
//! use grant_metrics::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Medium risk below {}", config.risk().medium_threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ComplianceSettings, EngineConfig, RiskSettings, UtilizationBasis};
