use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::workflows::webforms::{WebformImportError, WebformLeadImporter};

use super::super::pipeline::LeadQueueEntry;
use super::domain::{LeadId, LeadSubmission};
use super::repository::{CrmNotifier, LeadRepository, LeadStatusView, RepositoryError};
use super::scoring::{ActionPlan, CategoryScore, ScoreCategory};
use super::service::{LeadScoringService, LeadServiceError};

/// Router builder exposing HTTP endpoints for lead capture, scoring, and
/// prioritization.
pub fn lead_router<R, N>(service: Arc<LeadScoringService<R, N>>) -> Router
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_handler::<R, N>))
        .route("/api/v1/leads/import", post(import_handler::<R, N>))
        .route("/api/v1/leads/queue", get(queue_handler::<R, N>))
        .route("/api/v1/leads/:lead_id", get(status_handler::<R, N>))
        .route("/api/v1/leads/:lead_id/score", post(score_handler::<R, N>))
        .route(
            "/api/v1/leads/:lead_id/contact",
            post(contact_handler::<R, N>),
        )
        .route("/api/v1/leads/:lead_id/close", post(close_handler::<R, N>))
        .route("/api/v1/pipeline", get(pipeline_handler::<R, N>))
        .with_state(service)
}

/// Full scoring response: audit-ready breakdown plus the recommended play.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LeadScoreView {
    pub(crate) lead_id: LeadId,
    pub(crate) customer: String,
    pub(crate) rule_based_score: u8,
    pub(crate) label: &'static str,
    pub(crate) categories: BTreeMap<ScoreCategory, CategoryScore>,
    pub(crate) recommendation: ActionPlan,
}

impl LeadScoreView {
    fn from_record(record: &super::repository::LeadRecord) -> Option<Self> {
        let breakdown = record.score.as_ref()?;
        Some(Self {
            lead_id: record.lead_id.clone(),
            customer: record.submission.contact.name.clone(),
            rule_based_score: breakdown.total_score,
            label: breakdown.label(),
            categories: breakdown.categories.clone(),
            recommendation: breakdown.recommendation(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueParams {
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueueView {
    pub(crate) entries: Vec<LeadQueueEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) score_on_import: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportReport {
    pub(crate) imported: usize,
    pub(crate) skipped: usize,
    pub(crate) leads: Vec<LeadStatusView>,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(LeadServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(LeadServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "lead already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn import_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    axum::Json(request): axum::Json<ImportRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    let import = match WebformLeadImporter::from_reader(request.csv.as_bytes()) {
        Ok(import) => import,
        Err(error @ WebformImportError::Csv(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    let mut skipped = import.skipped;
    let mut leads = Vec::new();

    for lead in import.leads {
        let submitted_at = lead.submitted_at.unwrap_or_else(Utc::now);
        let record = match service.submit_backdated(lead.submission, submitted_at) {
            Ok(record) => record,
            Err(LeadServiceError::Intake(_)) => {
                skipped += 1;
                continue;
            }
            Err(other) => {
                let payload = json!({
                    "error": other.to_string(),
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
            }
        };

        let record = if request.score_on_import {
            match service.score(&record.lead_id) {
                Ok(scored) => scored,
                Err(other) => {
                    let payload = json!({
                        "error": other.to_string(),
                    });
                    return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload))
                        .into_response();
                }
            }
        } else {
            record
        };

        leads.push(record.status_view());
    }

    let report = ImportReport {
        imported: leads.len(),
        skipped,
        leads,
    };
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "lead not found",
                "lead_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    let id = LeadId(lead_id);
    match service.score(&id) {
        Ok(record) => match LeadScoreView::from_record(&record) {
            Some(view) => (StatusCode::OK, axum::Json(view)).into_response(),
            None => {
                let payload = json!({
                    "error": "scored lead is missing its breakdown",
                });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
            }
        },
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "lead not found",
                "lead_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn contact_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    let id = LeadId(lead_id);
    match service.mark_contacted(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "lead not found",
                "lead_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error @ LeadServiceError::NotReadyForContact { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn close_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    let id = LeadId(lead_id);
    match service.close(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "lead not found",
                "lead_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn queue_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
    Query(params): Query<QueueParams>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    match service.queue(params.limit) {
        Ok(entries) => {
            let view = QueueView { entries };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn pipeline_handler<R, N>(
    State(service): State<Arc<LeadScoringService<R, N>>>,
) -> Response
where
    R: LeadRepository + 'static,
    N: CrmNotifier + 'static,
{
    match service.pipeline_snapshot() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
