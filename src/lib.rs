//! Grant Metrics and Compliance Engine
//!
//! This crate computes timeline progress, fund utilization and risk for
//! funded grants, evaluates grants against compliance requirements, and
//! aggregates the results into per-grant reports and a portfolio dashboard.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
