use crate::error::OpinionError;
use crate::types::{Label, Opinion, OpinionId, ReviewId, UserId};

pub trait OpinionRepository {
    fn get(
        &self,
        review_id: &ReviewId,
        evaluator_id: UserId,
    ) -> Result<Option<Opinion>, OpinionError>;
    fn insert(&self, opinion: &Opinion) -> Result<(), OpinionError>;
    fn delete(&self, id: &OpinionId) -> Result<(), OpinionError>;
    fn count_for_review(&self, review_id: &ReviewId, label: Label) -> Result<i64, OpinionError>;
}
