use axum::Json;
use axum::http::StatusCode;
use rvd_core::error::{EligibilityError, OpinionError, ReviewError, ServiceError};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub timestamp: String,
    pub correlation_id: Option<String>,
}

pub fn map_error(
    err: &ServiceError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code, message) = match err {
        ServiceError::Validation(validation) => (
            StatusCode::BAD_REQUEST,
            "invalid_input",
            validation.to_string(),
        ),
        ServiceError::Review(review) => map_review_error(review),
        ServiceError::Opinion(opinion) => map_opinion_error(opinion),
        ServiceError::Eligibility(eligibility) => map_eligibility_error(eligibility),
        ServiceError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message.clone(),
        ),
    };

    (
        status,
        Json(ErrorEnvelope {
            code,
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
            correlation_id,
        }),
    )
}

fn map_review_error(err: &ReviewError) -> (StatusCode, &'static str, String) {
    match err {
        ReviewError::NotFound => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
        ReviewError::NoAccess => (StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        ReviewError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
        ReviewError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            err.to_string(),
        ),
    }
}

fn map_opinion_error(err: &OpinionError) -> (StatusCode, &'static str, String) {
    match err {
        OpinionError::ReviewNotFound | OpinionError::OpinionNotFound => {
            (StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        OpinionError::OwnReview => (StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        OpinionError::AlreadyExpressed { .. } | OpinionError::LabelMismatch { .. } => {
            (StatusCode::CONFLICT, "conflict", err.to_string())
        }
        OpinionError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            err.to_string(),
        ),
    }
}

fn map_eligibility_error(err: &EligibilityError) -> (StatusCode, &'static str, String) {
    match err {
        EligibilityError::EventNotFound { .. } | EligibilityError::EventNotCompleted { .. } => {
            (StatusCode::CONFLICT, "conflict", err.to_string())
        }
        EligibilityError::RegistrationNotFound { .. }
        | EligibilityError::RegistrationNotApproved { .. } => {
            (StatusCode::FORBIDDEN, "forbidden", err.to_string())
        }
        EligibilityError::Upstream { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "provider_unavailable",
            err.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvd_core::types::Label;

    #[test]
    fn duplicate_opinion_maps_to_conflict() {
        let err = ServiceError::Opinion(OpinionError::AlreadyExpressed { label: Label::Like });
        let (status, body) = map_error(&err, None);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "conflict");
    }

    #[test]
    fn missing_event_maps_to_conflict_not_not_found() {
        let err = ServiceError::Eligibility(EligibilityError::EventNotFound { event_id: 9 });
        let (status, _) = map_error(&err, None);
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn own_review_maps_to_forbidden() {
        let err = ServiceError::Opinion(OpinionError::OwnReview);
        let (status, _) = map_error(&err, None);
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
