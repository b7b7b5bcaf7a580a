use crate::types::enums::Label;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("review not found")]
    NotFound,
    #[error("no access to review")]
    NoAccess,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum OpinionError {
    #[error("review not found")]
    ReviewNotFound,
    #[error("opinion not found")]
    OpinionNotFound,
    #[error("author cannot opine on own review")]
    OwnReview,
    #[error("{label} already expressed; cannot repeat")]
    AlreadyExpressed { label: Label },
    #[error("stored opinion is {stored}, not {requested}; removal rejected")]
    LabelMismatch { stored: Label, requested: Label },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum EligibilityError {
    #[error("event {event_id} not found, review rejected")]
    EventNotFound { event_id: i64 },
    #[error("event {event_id} not completed")]
    EventNotCompleted { event_id: i64 },
    #[error("no registration found for event {event_id}")]
    RegistrationNotFound { event_id: i64 },
    #[error("registration to event {event_id} has status {status}, not APPROVED")]
    RegistrationNotApproved { event_id: i64, status: String },
    #[error("upstream lookup failed: {message}")]
    Upstream { message: String },
}

#[derive(Debug, Error)]
#[error("invalid request: {message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Opinion(#[from] OpinionError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
