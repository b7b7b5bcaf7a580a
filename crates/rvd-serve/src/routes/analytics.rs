use crate::routes::error::map_error;
use crate::{AppState, build_service};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rvd_core::types::{AuthorAverageMark, BestAndWorstReviews, EventAverageMark, EventIndicators};
use rvd_core::validation::{validate_event_id, validate_user_id};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/reviews/analytics/events/{event_id}/average-mark",
            get(event_average_mark),
        )
        .route(
            "/reviews/analytics/authors/{author_id}/average-mark",
            get(author_average_mark),
        )
        .route(
            "/reviews/analytics/events/{event_id}/indicators",
            get(event_indicators),
        )
        .route(
            "/reviews/analytics/events/{event_id}/best-and-worst",
            get(best_and_worst_reviews),
        )
        .with_state(state)
}

#[utoipa::path(get, path = "/api/reviews/analytics/events/{event_id}/average-mark",
    params(("event_id" = i64, Path, description = "Event ID")),
    responses((status = 200, body = EventAverageMark)))]
pub(crate) async fn event_average_mark(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Response {
    if let Err(err) = validate_event_id(event_id) {
        return map_error(&err.into(), None).into_response();
    }
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match service.analytics().event_average_mark(event_id) {
        Ok(average) => Json(average).into_response(),
        Err(err) => map_error(&err, None).into_response(),
    }
}

#[utoipa::path(get, path = "/api/reviews/analytics/authors/{author_id}/average-mark",
    params(("author_id" = i64, Path, description = "Author user ID")),
    responses((status = 200, body = AuthorAverageMark)))]
pub(crate) async fn author_average_mark(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> Response {
    if let Err(err) = validate_user_id(author_id) {
        return map_error(&err.into(), None).into_response();
    }
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match service.analytics().author_average_mark(author_id) {
        Ok(average) => Json(average).into_response(),
        Err(err) => map_error(&err, None).into_response(),
    }
}

#[utoipa::path(get, path = "/api/reviews/analytics/events/{event_id}/indicators",
    params(("event_id" = i64, Path, description = "Event ID")),
    responses((status = 200, body = EventIndicators)))]
pub(crate) async fn event_indicators(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Response {
    if let Err(err) = validate_event_id(event_id) {
        return map_error(&err.into(), None).into_response();
    }
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match service.analytics().event_indicators(event_id) {
        Ok(indicators) => Json(indicators).into_response(),
        Err(err) => map_error(&err, None).into_response(),
    }
}

#[utoipa::path(get, path = "/api/reviews/analytics/events/{event_id}/best-and-worst",
    params(("event_id" = i64, Path, description = "Event ID")),
    responses((status = 200, body = BestAndWorstReviews)))]
pub(crate) async fn best_and_worst_reviews(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Response {
    if let Err(err) = validate_event_id(event_id) {
        return map_error(&err.into(), None).into_response();
    }
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match service.analytics().best_and_worst_reviews(event_id) {
        Ok(lists) => Json(lists).into_response(),
        Err(err) => map_error(&err, None).into_response(),
    }
}
