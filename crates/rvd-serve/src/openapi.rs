use utoipa::OpenApi;

use crate::routes::error::ErrorEnvelope;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rvd_core::types::analytics::{
    AuthorAverageMark, BestAndWorstReviews, EventAverageMark, EventIndicators,
};
use rvd_core::types::enums::Label;
use rvd_core::types::ids::{OpinionId, ReviewId};
use rvd_core::types::io::{CreateReviewInput, ReviewListQuery, UpdateReviewInput};
use rvd_core::types::opinion::Opinion;
use rvd_core::types::review::Review;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::reviews::create_review,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::get_review,
        crate::routes::reviews::update_review,
        crate::routes::reviews::delete_review,
        crate::routes::opinions::add_like,
        crate::routes::opinions::remove_like,
        crate::routes::opinions::add_dislike,
        crate::routes::opinions::remove_dislike,
        crate::routes::analytics::event_average_mark,
        crate::routes::analytics::author_average_mark,
        crate::routes::analytics::event_indicators,
        crate::routes::analytics::best_and_worst_reviews
    ),
    components(schemas(
        Review,
        Opinion,
        CreateReviewInput,
        UpdateReviewInput,
        ReviewListQuery,
        EventAverageMark,
        AuthorAverageMark,
        EventIndicators,
        BestAndWorstReviews,
        ReviewId,
        OpinionId,
        Label,
        ErrorEnvelope
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
