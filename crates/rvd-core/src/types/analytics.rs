use crate::types::ids::{EventId, UserId};
use crate::types::review::Review;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Average mark over an event's reviews, excluding low-trust ones.
/// `average_mark` is absent when no qualifying review exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventAverageMark {
    pub event_id: EventId,
    pub average_mark: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorAverageMark {
    pub author_id: UserId,
    pub average_mark: Option<f64>,
}

/// Positive/negative split of an event's reviews. All fields are absent
/// when the event has no review on either side of the thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventIndicators {
    pub event_id: EventId,
    pub number_of_reviews: Option<i64>,
    pub positive_percent: Option<f64>,
    pub negative_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BestAndWorstReviews {
    pub event_id: EventId,
    pub best_reviews: Vec<Review>,
    pub worst_reviews: Vec<Review>,
}
