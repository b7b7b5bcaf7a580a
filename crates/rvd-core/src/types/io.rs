use crate::types::ids::{EventId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewInput {
    pub author_id: UserId,
    pub username: String,
    pub event_id: EventId,
    pub title: Option<String>,
    pub content: String,
    pub mark: i64,
}

/// Partial update: a missing field means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateReviewInput {
    pub username: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub mark: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct ReviewListQuery {
    pub event_id: EventId,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    10
}
