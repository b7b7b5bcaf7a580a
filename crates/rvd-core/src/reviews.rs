use crate::error::ReviewError;
use crate::types::{EventId, Review, ReviewId, UserId};

pub trait ReviewRepository {
    fn insert(&self, review: &Review) -> Result<(), ReviewError>;
    fn get(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError>;
    fn get_for_author(
        &self,
        id: &ReviewId,
        author_id: UserId,
    ) -> Result<Option<Review>, ReviewError>;
    fn list_by_event(
        &self,
        event_id: EventId,
        page: u32,
        size: u32,
    ) -> Result<Vec<Review>, ReviewError>;
    fn update(&self, review: &Review) -> Result<(), ReviewError>;
    /// Applies the given deltas atomically at the storage layer so that
    /// concurrent toggles from different evaluators cannot lose updates.
    fn adjust_counters(
        &self,
        id: &ReviewId,
        likes_delta: i64,
        dislikes_delta: i64,
    ) -> Result<(), ReviewError>;
    fn delete(&self, id: &ReviewId) -> Result<(), ReviewError>;

    /// Average mark over the event's reviews, skipping low-trust ones:
    /// `likes + dislikes > engagement_limit AND dislikes > likes`.
    /// `None` when no qualifying review exists.
    fn average_mark_for_event(
        &self,
        event_id: EventId,
        engagement_limit: i64,
    ) -> Result<Option<f64>, ReviewError>;
    fn average_mark_for_author(
        &self,
        author_id: UserId,
        engagement_limit: i64,
    ) -> Result<Option<f64>, ReviewError>;
    fn count_with_mark_below(&self, event_id: EventId, ceiling: i64) -> Result<i64, ReviewError>;
    fn count_with_mark_above(&self, event_id: EventId, floor: i64) -> Result<i64, ReviewError>;
    fn best_for_event(
        &self,
        event_id: EventId,
        mark_floor: i64,
        limit: u32,
    ) -> Result<Vec<Review>, ReviewError>;
    fn worst_for_event(
        &self,
        event_id: EventId,
        mark_ceiling: i64,
        limit: u32,
    ) -> Result<Vec<Review>, ReviewError>;
}
