pub mod analytics;
pub mod error;
pub mod opinions;
pub mod reviews;

use crate::middleware::correlation::correlation_middleware;
use crate::{AppState, openapi};
use axum::Router;
use axum::http::HeaderMap;
use axum::middleware;
use rvd_core::ServiceError;
use rvd_core::error::ValidationError;
use rvd_core::types::{ReviewId, UserId};
use rvd_core::validation::validate_user_id;
use tower_http::cors::CorsLayer;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(reviews::router(state.clone()))
        .merge(opinions::router(state.clone()))
        .merge(analytics::router(state.clone()))
        .merge(openapi::router())
        .layer(CorsLayer::permissive())
        .route_layer(middleware::from_fn(correlation_middleware));

    Router::new().nest("/api", api)
}

pub(crate) fn parse_review_id(value: &str) -> Result<ReviewId, ServiceError> {
    value
        .parse::<ReviewId>()
        .map_err(|err| ValidationError::new(err.to_string()).into())
}

/// Actor identity travels in the `X-Review-User-Id` header, as with the
/// upstream registration service.
pub(crate) fn user_id_header(headers: &HeaderMap) -> Result<UserId, ServiceError> {
    let value = headers
        .get(rvd_clients::REVIEW_USER_ID_HEADER)
        .ok_or_else(|| ValidationError::new("missing X-Review-User-Id header"))?;
    let id = value
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .ok_or_else(|| ValidationError::new("X-Review-User-Id must be an integer"))?;
    validate_user_id(id)?;
    Ok(id)
}
