use crate::types::ids::{EventId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A review of a completed event.
///
/// `likes` and `dislikes` are derived counters: each must equal the number
/// of opinion rows referencing this review with the matching label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: ReviewId,
    pub author_id: UserId,
    pub author_username: String,
    pub event_id: EventId,
    pub title: Option<String>,
    pub content: String,
    pub mark: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}
