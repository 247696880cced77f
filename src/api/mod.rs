//! HTTP API module for the grant metrics engine.
//!
//! This module provides the REST endpoints for progress, compliance,
//! per-grant reports and the portfolio dashboard.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DashboardRequest, EvaluationRequest, ProgressRequest, resolve_as_of};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
