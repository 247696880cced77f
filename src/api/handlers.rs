//! HTTP request handlers for the grant metrics API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{assess_compliance, build_dashboard, build_grant_report, calculate_progress};

use super::request::{DashboardRequest, EvaluationRequest, ProgressRequest, resolve_as_of};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/progress", post(progress_handler))
        .route("/compliance", post(compliance_handler))
        .route("/report", post(report_handler))
        .route("/dashboard", post(dashboard_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    json_response(
        StatusCode::OK,
        json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }),
    )
}

/// Handler for POST /progress.
///
/// Returns progress, utilization and risk for one grant.
async fn progress_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing progress request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    let as_of = resolve_as_of(request.as_of);
    let start_time = Instant::now();
    let metrics = calculate_progress(&request.grant, as_of, state.config().risk()).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Progress calculation failed");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        grant_id = %metrics.grant_id,
        risk_level = ?metrics.risk_level,
        duration_us = start_time.elapsed().as_micros(),
        "Progress calculated"
    );
    Ok(json_response(StatusCode::OK, metrics))
}

/// Handler for POST /compliance.
///
/// Evaluates a grant against the given requirements, or its own set. A grant
/// that fails validation is rejected before any rule runs.
async fn compliance_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compliance request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    request.grant.validate().map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Compliance request rejected");
        ApiErrorResponse::from(err)
    })?;

    let as_of = resolve_as_of(request.as_of);
    let start_time = Instant::now();
    let summary = assess_compliance(
        &request.grant,
        request.requirements(),
        as_of,
        state.config().compliance(),
    );

    info!(
        correlation_id = %correlation_id,
        grant_id = %summary.grant_id,
        requirements = summary.total_requirements,
        status = ?summary.status,
        duration_us = start_time.elapsed().as_micros(),
        "Compliance assessed"
    );
    Ok(json_response(StatusCode::OK, summary))
}

/// Handler for POST /report.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    let as_of = resolve_as_of(request.as_of);
    let report = build_grant_report(
        &request.grant,
        Some(request.requirements()),
        as_of,
        state.config().config(),
    )
    .map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Report generation failed");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        report_id = %report.report_id,
        grant_id = %report.grant_id,
        "Report generated"
    );
    Ok(json_response(StatusCode::OK, report))
}

/// Handler for POST /dashboard.
///
/// Always succeeds for a well-formed body; invalid grants are reported in
/// the summary's failure list.
async fn dashboard_handler(
    State(state): State<AppState>,
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dashboard request");

    let Json(request) = payload.map_err(|rejection| rejection_error(rejection, correlation_id))?;

    let as_of = resolve_as_of(request.as_of);
    let start_time = Instant::now();
    let dashboard = build_dashboard(&request.grants, as_of, state.config().config());

    info!(
        correlation_id = %correlation_id,
        grants = dashboard.total_grants,
        failures = dashboard.failures.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Dashboard built"
    );
    Ok(json_response(StatusCode::OK, dashboard))
}
