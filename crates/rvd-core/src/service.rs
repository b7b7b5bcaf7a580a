use crate::error::{OpinionError, ReviewError, ServiceError};
use crate::opinions::OpinionRepository;
use crate::reviews::ReviewRepository;
use crate::store::Store;
use crate::types::io::{CreateReviewInput, UpdateReviewInput};
use crate::types::{
    AuthorAverageMark, BestAndWorstReviews, EventAverageMark, EventId, EventIndicators, Label,
    Opinion, OpinionId, Review, ReviewId, UserId, UserSnapshot,
};
use crate::users::UserRepository;
use crate::validation;
use chrono::Utc;

/// Reviews with more engagement than this whose dislikes outweigh likes
/// are excluded from average-mark math.
pub const ENGAGEMENT_SUM_LIMIT: i64 = 10;
/// A review is positive when `mark > POSITIVE_MARK_FLOOR`.
pub const POSITIVE_MARK_FLOOR: i64 = 5;
/// A review is negative when `mark < NEGATIVE_MARK_CEILING`.
pub const NEGATIVE_MARK_CEILING: i64 = 6;
/// Cap for best/worst review lists.
pub const REVIEWS_PER_LIST: u32 = 3;

pub struct ReviewService<S: Store> {
    store: S,
}

impl<S: Store> ReviewService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn reviews(&self) -> ReviewsApi<'_, S> {
        ReviewsApi { core: self }
    }

    pub fn opinions(&self) -> OpinionsApi<'_, S> {
        OpinionsApi { core: self }
    }

    pub fn analytics(&self) -> AnalyticsApi<'_, S> {
        AnalyticsApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct ReviewsApi<'a, S: Store> {
    core: &'a ReviewService<S>,
}

impl<'a, S: Store> ReviewsApi<'a, S> {
    /// Persists a new review. Eligibility against the event catalog and
    /// registration service is checked by the caller before this runs.
    pub fn create(&self, input: CreateReviewInput) -> Result<Review, ServiceError> {
        validation::validate_create(&input)?;
        let now = Utc::now();
        let review = Review {
            id: ReviewId::generate(),
            author_id: input.author_id,
            author_username: input.username.clone(),
            event_id: input.event_id,
            title: input.title,
            content: input.content,
            mark: input.mark,
            likes: 0,
            dislikes: 0,
            created_on: now,
            updated_on: now,
        };
        self.core.store.with_tx(|store| {
            store.users().upsert(&UserSnapshot {
                id: input.author_id,
                username: input.username.clone(),
            })?;
            store.reviews().insert(&review)?;
            log::info!("review added: id={}", review.id);
            Ok(review.clone())
        })
    }

    /// Partial update, restricted to the original author. A non-matching
    /// author sees NotFound since the lookup key includes the author id.
    pub fn update(
        &self,
        id: &ReviewId,
        author_id: UserId,
        input: UpdateReviewInput,
    ) -> Result<Review, ServiceError> {
        validation::validate_update(&input)?;
        self.core.store.with_tx(|store| {
            let mut review = store
                .reviews()
                .get_for_author(id, author_id)?
                .ok_or(ReviewError::NotFound)?;
            if let Some(username) = &input.username {
                if *username != review.author_username {
                    review.author_username = username.clone();
                    store.users().upsert(&UserSnapshot {
                        id: author_id,
                        username: username.clone(),
                    })?;
                }
            }
            if let Some(title) = &input.title {
                review.title = Some(title.clone());
            }
            if let Some(content) = &input.content {
                review.content = content.clone();
            }
            if let Some(mark) = input.mark {
                review.mark = mark;
            }
            review.updated_on = Utc::now();
            store.reviews().update(&review)?;
            log::info!("review updated: id={}", review.id);
            Ok(review)
        })
    }

    pub fn get(&self, id: &ReviewId) -> Result<Review, ServiceError> {
        let review = self
            .core
            .store
            .reviews()
            .get(id)?
            .ok_or(ReviewError::NotFound)?;
        Ok(review)
    }

    pub fn list_by_event(
        &self,
        event_id: EventId,
        page: u32,
        size: u32,
    ) -> Result<Vec<Review>, ServiceError> {
        let reviews = self.core.store.reviews().list_by_event(event_id, page, size)?;
        Ok(reviews)
    }

    /// Deletes an author-owned review; its opinions go with it.
    pub fn delete(&self, id: &ReviewId, author_id: UserId) -> Result<ReviewId, ServiceError> {
        self.core.store.with_tx(|store| {
            let review = store.reviews().get(id)?.ok_or(ReviewError::NotFound)?;
            if review.author_id != author_id {
                log::error!("user {author_id} has no access to review {id}");
                return Err(ReviewError::NoAccess.into());
            }
            store.reviews().delete(id)?;
            log::info!("review deleted: id={id}");
            Ok(id.clone())
        })
    }
}

pub struct OpinionsApi<'a, S: Store> {
    core: &'a ReviewService<S>,
}

impl<'a, S: Store> OpinionsApi<'a, S> {
    /// Records a like or dislike. Adding the opposite label replaces the
    /// stored opinion in one atomic step (counters move -1/+1); repeating
    /// the stored label is a conflict.
    pub fn add(
        &self,
        review_id: &ReviewId,
        evaluator_id: UserId,
        label: Label,
    ) -> Result<(), ServiceError> {
        self.core.store.with_tx(|store| {
            let review = store
                .reviews()
                .get(review_id)?
                .ok_or(OpinionError::ReviewNotFound)?;
            if review.author_id == evaluator_id {
                log::error!("user {evaluator_id} cannot put {label} on own review {review_id}");
                return Err(OpinionError::OwnReview.into());
            }
            match store.opinions().get(review_id, evaluator_id)? {
                Some(existing) if existing.label == label => {
                    log::error!(
                        "user {evaluator_id} already put {label} on review {review_id}"
                    );
                    Err(OpinionError::AlreadyExpressed { label }.into())
                }
                Some(existing) => {
                    store.opinions().delete(&existing.id)?;
                    store.opinions().insert(&Opinion {
                        id: OpinionId::generate(),
                        review_id: review_id.clone(),
                        evaluator_id,
                        label,
                    })?;
                    let (likes_delta, dislikes_delta) = swap_deltas(label);
                    store
                        .reviews()
                        .adjust_counters(review_id, likes_delta, dislikes_delta)?;
                    log::info!(
                        "opinion of user {evaluator_id} on review {review_id} swapped to {label}"
                    );
                    Ok(())
                }
                None => {
                    store.opinions().insert(&Opinion {
                        id: OpinionId::generate(),
                        review_id: review_id.clone(),
                        evaluator_id,
                        label,
                    })?;
                    let (likes_delta, dislikes_delta) = add_deltas(label);
                    store
                        .reviews()
                        .adjust_counters(review_id, likes_delta, dislikes_delta)?;
                    log::info!("{label} from user {evaluator_id} to review {review_id} added");
                    Ok(())
                }
            }
        })
    }

    /// Removes a stored opinion; the requested label must name the label
    /// that is actually stored.
    pub fn remove(
        &self,
        review_id: &ReviewId,
        evaluator_id: UserId,
        label: Label,
    ) -> Result<(), ServiceError> {
        self.core.store.with_tx(|store| {
            let opinion = store
                .opinions()
                .get(review_id, evaluator_id)?
                .ok_or(OpinionError::OpinionNotFound)?;
            if opinion.label != label {
                log::error!(
                    "user {evaluator_id} put {} on review {review_id} but asked to remove {label}",
                    opinion.label
                );
                return Err(OpinionError::LabelMismatch {
                    stored: opinion.label,
                    requested: label,
                }
                .into());
            }
            let (likes_delta, dislikes_delta) = remove_deltas(label);
            store
                .reviews()
                .adjust_counters(review_id, likes_delta, dislikes_delta)?;
            store.opinions().delete(&opinion.id)?;
            log::info!("{label} from user {evaluator_id} to review {review_id} removed");
            Ok(())
        })
    }
}

fn add_deltas(label: Label) -> (i64, i64) {
    match label {
        Label::Like => (1, 0),
        Label::Dislike => (0, 1),
    }
}

fn remove_deltas(label: Label) -> (i64, i64) {
    match label {
        Label::Like => (-1, 0),
        Label::Dislike => (0, -1),
    }
}

fn swap_deltas(new_label: Label) -> (i64, i64) {
    match new_label {
        Label::Like => (1, -1),
        Label::Dislike => (-1, 1),
    }
}

pub struct AnalyticsApi<'a, S: Store> {
    core: &'a ReviewService<S>,
}

impl<'a, S: Store> AnalyticsApi<'a, S> {
    pub fn event_average_mark(&self, event_id: EventId) -> Result<EventAverageMark, ServiceError> {
        let average = self
            .core
            .store
            .reviews()
            .average_mark_for_event(event_id, ENGAGEMENT_SUM_LIMIT)?;
        Ok(EventAverageMark {
            event_id,
            average_mark: average.map(truncate_tenths),
        })
    }

    pub fn author_average_mark(
        &self,
        author_id: UserId,
    ) -> Result<AuthorAverageMark, ServiceError> {
        let average = self
            .core
            .store
            .reviews()
            .average_mark_for_author(author_id, ENGAGEMENT_SUM_LIMIT)?;
        Ok(AuthorAverageMark {
            author_id,
            average_mark: average.map(truncate_tenths),
        })
    }

    pub fn event_indicators(&self, event_id: EventId) -> Result<EventIndicators, ServiceError> {
        let reviews = self.core.store.reviews();
        let negative = reviews.count_with_mark_below(event_id, NEGATIVE_MARK_CEILING)?;
        let positive = reviews.count_with_mark_above(event_id, POSITIVE_MARK_FLOOR)?;
        Ok(assemble_indicators(
            event_id,
            (negative > 0).then_some(negative),
            (positive > 0).then_some(positive),
        ))
    }

    pub fn best_and_worst_reviews(
        &self,
        event_id: EventId,
    ) -> Result<BestAndWorstReviews, ServiceError> {
        let reviews = self.core.store.reviews();
        let best_reviews =
            reviews.best_for_event(event_id, POSITIVE_MARK_FLOOR, REVIEWS_PER_LIST)?;
        let worst_reviews =
            reviews.worst_for_event(event_id, NEGATIVE_MARK_CEILING, REVIEWS_PER_LIST)?;
        Ok(BestAndWorstReviews {
            event_id,
            best_reviews,
            worst_reviews,
        })
    }
}

/// Truncates to one decimal place (floor, not round).
fn truncate_tenths(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}

fn assemble_indicators(
    event_id: EventId,
    negative: Option<i64>,
    positive: Option<i64>,
) -> EventIndicators {
    match (negative, positive) {
        (None, None) => EventIndicators {
            event_id,
            number_of_reviews: None,
            positive_percent: None,
            negative_percent: None,
        },
        (Some(negative), None) => EventIndicators {
            event_id,
            number_of_reviews: Some(negative),
            positive_percent: Some(0.0),
            negative_percent: Some(100.0),
        },
        (None, Some(positive)) => EventIndicators {
            event_id,
            number_of_reviews: Some(positive),
            positive_percent: Some(100.0),
            negative_percent: Some(0.0),
        },
        (Some(negative), Some(positive)) => {
            let total = negative + positive;
            // Truncated independently; the two percents need not sum to 100.0.
            EventIndicators {
                event_id,
                number_of_reviews: Some(total),
                positive_percent: Some(truncate_tenths(positive as f64 * 100.0 / total as f64)),
                negative_percent: Some(truncate_tenths(negative as f64 * 100.0 / total as f64)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero_at_one_decimal() {
        assert_eq!(truncate_tenths(7.49), 7.4);
        assert_eq!(truncate_tenths(7.45), 7.4);
        assert_eq!(truncate_tenths(6.0), 6.0);
    }

    #[test]
    fn indicators_absent_without_reviews() {
        let indicators = assemble_indicators(1, None, None);
        assert_eq!(indicators.number_of_reviews, None);
        assert_eq!(indicators.positive_percent, None);
        assert_eq!(indicators.negative_percent, None);
    }

    #[test]
    fn indicators_single_sided() {
        let positive_only = assemble_indicators(1, None, Some(4));
        assert_eq!(positive_only.number_of_reviews, Some(4));
        assert_eq!(positive_only.positive_percent, Some(100.0));
        assert_eq!(positive_only.negative_percent, Some(0.0));

        let negative_only = assemble_indicators(1, Some(2), None);
        assert_eq!(negative_only.number_of_reviews, Some(2));
        assert_eq!(negative_only.positive_percent, Some(0.0));
        assert_eq!(negative_only.negative_percent, Some(100.0));
    }

    #[test]
    fn indicators_percentages_truncated_independently() {
        // 5 positive, 4 negative: 55.55..% and 44.44..%.
        let indicators = assemble_indicators(1, Some(4), Some(5));
        assert_eq!(indicators.number_of_reviews, Some(9));
        assert_eq!(indicators.positive_percent, Some(55.5));
        assert_eq!(indicators.negative_percent, Some(44.4));
    }

    #[test]
    fn indicators_thirds_do_not_sum_to_hundred() {
        let indicators = assemble_indicators(1, Some(1), Some(2));
        assert_eq!(indicators.positive_percent, Some(66.6));
        assert_eq!(indicators.negative_percent, Some(33.3));
    }
}
