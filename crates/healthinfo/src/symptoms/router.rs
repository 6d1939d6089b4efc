use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::intake::SymptomSubmission;
use super::service::SymptomCheckService;

/// Router builder exposing the symptom checker and the symptom picker catalog.
pub fn symptom_router(service: Arc<SymptomCheckService>) -> Router {
    Router::new()
        .route("/api/symptom-checker", post(check_handler))
        .route("/api/symptoms", get(catalog_handler))
        .route("/api/symptoms/knowledge-base", get(knowledge_base_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogQuery {
    #[serde(default)]
    pub(crate) q: Option<String>,
}

pub(crate) async fn check_handler(
    State(service): State<Arc<SymptomCheckService>>,
    axum::Json(submission): axum::Json<SymptomSubmission>,
) -> Response {
    match service.check(submission) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(violation) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn catalog_handler(
    State(service): State<Arc<SymptomCheckService>>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let catalog = service.catalog(query.q.as_deref());
    (StatusCode::OK, axum::Json(catalog)).into_response()
}

pub(crate) async fn knowledge_base_handler(
    State(service): State<Arc<SymptomCheckService>>,
) -> Response {
    (StatusCode::OK, axum::Json(service.info().clone())).into_response()
}
