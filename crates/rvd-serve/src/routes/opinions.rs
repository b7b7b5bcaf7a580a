use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::routes::{parse_review_id, user_id_header};
use crate::{AppState, build_service};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::put;
use axum::{Extension, Router};
use rvd_core::types::Label;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reviews/{id}/like", put(add_like).delete(remove_like))
        .route(
            "/reviews/{id}/dislike",
            put(add_dislike).delete(remove_dislike),
        )
        .with_state(state)
}

#[utoipa::path(put, path = "/api/reviews/{id}/like",
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 200)))]
pub(crate) async fn add_like(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    add_opinion(&state, &correlation, &id, &headers, Label::Like)
}

#[utoipa::path(put, path = "/api/reviews/{id}/dislike",
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 200)))]
pub(crate) async fn add_dislike(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    add_opinion(&state, &correlation, &id, &headers, Label::Dislike)
}

#[utoipa::path(delete, path = "/api/reviews/{id}/like",
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 204)))]
pub(crate) async fn remove_like(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    remove_opinion(&state, &correlation, &id, &headers, Label::Like)
}

#[utoipa::path(delete, path = "/api/reviews/{id}/dislike",
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 204)))]
pub(crate) async fn remove_dislike(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    remove_opinion(&state, &correlation, &id, &headers, Label::Dislike)
}

fn add_opinion(
    state: &AppState,
    correlation: &CorrelationId,
    id: &str,
    headers: &HeaderMap,
    label: Label,
) -> Response {
    let correlation_id = Some(correlation.0.clone());
    let review_id = match parse_review_id(id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let evaluator_id = match user_id_header(headers) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let service = match build_service(state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    match service.opinions().add(&review_id, evaluator_id, label) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => map_error(&err, correlation_id).into_response(),
    }
}

fn remove_opinion(
    state: &AppState,
    correlation: &CorrelationId,
    id: &str,
    headers: &HeaderMap,
    label: Label,
) -> Response {
    let correlation_id = Some(correlation.0.clone());
    let review_id = match parse_review_id(id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let evaluator_id = match user_id_header(headers) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let service = match build_service(state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    match service.opinions().remove(&review_id, evaluator_id, label) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error(&err, correlation_id).into_response(),
    }
}
