use crate::types::enums::Label;
use crate::types::ids::{OpinionId, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user's recorded like or dislike on one review.
///
/// At most one opinion exists per `(review_id, evaluator_id)` pair; the
/// storage layer enforces this with a unique index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Opinion {
    pub id: OpinionId,
    pub review_id: ReviewId,
    pub evaluator_id: UserId,
    pub label: Label,
}
