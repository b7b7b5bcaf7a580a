use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::routes::{parse_review_id, user_id_header};
use crate::{AppState, build_service};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use rvd_core::error::ValidationError;
use rvd_core::types::Review;
use rvd_core::types::io::{CreateReviewInput, ReviewListQuery, UpdateReviewInput};
use rvd_core::{eligibility, validation};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reviews", post(create_review).get(list_reviews))
        .route(
            "/reviews/{id}",
            get(get_review).patch(update_review).delete(delete_review),
        )
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewInput,
    responses((status = 201, body = Review))
)]
pub(crate) async fn create_review(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<CreateReviewInput>,
) -> Response {
    let correlation_id = Some(correlation.0);
    // Reject malformed input before bothering the upstream services.
    if let Err(err) = validation::validate_create(&input) {
        return map_error(&err.into(), correlation_id).into_response();
    }

    let event = state.events.event_by_id(input.author_id, input.event_id).await;
    if let Err(err) = eligibility::check_event(event, input.event_id, Utc::now()) {
        return map_error(&err.into(), correlation_id).into_response();
    }
    let registration = state
        .registrations
        .registration_status(input.event_id, input.author_id)
        .await;
    if let Err(err) = eligibility::check_registration(registration, input.event_id) {
        return map_error(&err.into(), correlation_id).into_response();
    }

    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    match service.reviews().create(input) {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(err) => map_error(&err, correlation_id).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/reviews/{id}",
    request_body = UpdateReviewInput,
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 200, body = Review))
)]
pub(crate) async fn update_review(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UpdateReviewInput>,
) -> Response {
    let correlation_id = Some(correlation.0);
    let review_id = match parse_review_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let author_id = match user_id_header(&headers) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    match service.reviews().update(&review_id, author_id, input) {
        Ok(review) => Json(review).into_response(),
        Err(err) => map_error(&err, correlation_id).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 200, body = Review))
)]
pub(crate) async fn get_review(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let review_id = match parse_review_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, None).into_response(),
    };
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match service.reviews().get(&review_id) {
        Ok(review) => Json(review).into_response(),
        Err(err) => map_error(&err, None).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    params(ReviewListQuery),
    responses((status = 200, body = Vec<Review>))
)]
pub(crate) async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Response {
    if let Err(err) = validation::validate_event_id(query.event_id) {
        return map_error(&err.into(), None).into_response();
    }
    if query.size == 0 {
        let err = ValidationError::new("parameter 'size' should be positive");
        return map_error(&err.into(), None).into_response();
    }
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match service
        .reviews()
        .list_by_event(query.event_id, query.page, query.size)
    {
        Ok(reviews) => Json(reviews).into_response(),
        Err(err) => map_error(&err, None).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = String, Path, description = "Review ID")),
    responses((status = 204))
)]
pub(crate) async fn delete_review(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Some(correlation.0);
    let review_id = match parse_review_id(&id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let author_id = match user_id_header(&headers) {
        Ok(value) => value,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    let service = match build_service(&state) {
        Ok(service) => service,
        Err(err) => return map_error(&err, correlation_id).into_response(),
    };
    match service.reviews().delete(&review_id, author_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error(&err, correlation_id).into_response(),
    }
}
