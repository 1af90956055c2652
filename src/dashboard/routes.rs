//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::{AgentError, EdgeResult, Parlay, ParlayOutcome, Report};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Latest report generation result.
#[derive(Debug, Clone)]
pub enum ReportSnapshot {
    Pending,
    Ready(Report),
    Failed { at: DateTime<Utc>, message: String },
}

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub report: RwLock<ReportSnapshot>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            report: RwLock::new(ReportSnapshot::Pending),
        }
    }

    /// Record the outcome of a report generation.
    pub async fn publish(&self, result: &Result<Report, AgentError>) {
        let snapshot = match result {
            Ok(report) => ReportSnapshot::Ready(report.clone()),
            Err(e) => ReportSnapshot::Failed {
                at: Utc::now(),
                message: e.to_string(),
            },
        };
        *self.report.write().await = snapshot;
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParlaysResponse {
    pub insufficient_legs: bool,
    pub parlays: Vec<ParlayEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParlayEntry {
    pub name: String,
    pub legs: Vec<String>,
    pub combined_probability: f64,
    pub combined_pct: f64,
}

impl From<&Parlay> for ParlayEntry {
    fn from(p: &Parlay) -> Self {
        Self {
            name: p.name.clone(),
            legs: p.legs.clone(),
            combined_probability: p.combined_probability,
            combined_pct: (p.combined_probability * 1000.0).round() / 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub type AppState = Arc<DashboardState>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Unavailable response for a pending or failed snapshot.
fn unavailable(snapshot: &ReportSnapshot) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message, at) = match snapshot {
        ReportSnapshot::Failed { at, message } => ("failed", message.clone(), Some(*at)),
        _ => ("pending", "No report generated yet".to_string(), None),
    };
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            status: status.to_string(),
            message,
            at,
        }),
    )
}

/// GET /api/report
pub async fn get_report(State(state): State<AppState>) -> ApiResult<Report> {
    let snapshot = state.report.read().await;
    match &*snapshot {
        ReportSnapshot::Ready(report) => Ok(Json(report.clone())),
        other => Err(unavailable(other)),
    }
}

/// GET /api/outcomes
pub async fn get_outcomes(State(state): State<AppState>) -> ApiResult<Vec<EdgeResult>> {
    let snapshot = state.report.read().await;
    match &*snapshot {
        ReportSnapshot::Ready(report) => Ok(Json(report.outcomes.clone())),
        other => Err(unavailable(other)),
    }
}

/// GET /api/parlays
pub async fn get_parlays(State(state): State<AppState>) -> ApiResult<ParlaysResponse> {
    let snapshot = state.report.read().await;
    match &*snapshot {
        ReportSnapshot::Ready(report) => Ok(Json(ParlaysResponse {
            insufficient_legs: matches!(report.parlays, ParlayOutcome::InsufficientLegs { .. }),
            parlays: report.parlays.parlays().iter().map(ParlayEntry::from).collect(),
        })),
        other => Err(unavailable(other)),
    }
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
