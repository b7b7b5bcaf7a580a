use chrono::{Duration, TimeZone, Utc};
use rvd_core::error::{OpinionError, ReviewError, ServiceError};
use rvd_core::opinions::OpinionRepository;
use rvd_core::reviews::ReviewRepository;
use rvd_core::store::Store;
use rvd_core::types::io::{CreateReviewInput, UpdateReviewInput};
use rvd_core::types::{Label, Review, ReviewId, UserSnapshot};
use rvd_core::users::UserRepository;
use rvd_core::ReviewService;
use rvd_db::schema::with_test_db;
use rvd_db::store::DbStore;

fn setup_service() -> ReviewService<DbStore> {
    let conn = with_test_db().unwrap();
    ReviewService::new(DbStore::new(conn))
}

fn create_input(author_id: i64, event_id: i64, mark: i64) -> CreateReviewInput {
    CreateReviewInput {
        author_id,
        username: format!("user{author_id}"),
        event_id,
        title: None,
        content: "a fine event overall".to_string(),
        mark,
    }
}

fn add_review(service: &ReviewService<DbStore>, author_id: i64, event_id: i64, mark: i64) -> Review {
    service
        .reviews()
        .create(create_input(author_id, event_id, mark))
        .unwrap()
}

// Inserts directly through the repository so created_on can be pinned.
fn insert_review_at(
    service: &ReviewService<DbStore>,
    author_id: i64,
    event_id: i64,
    mark: i64,
    minutes: i64,
) -> Review {
    let created_on = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
    let review = Review {
        id: ReviewId::generate(),
        author_id,
        author_username: format!("user{author_id}"),
        event_id,
        title: None,
        content: "a fine event overall".to_string(),
        mark,
        likes: 0,
        dislikes: 0,
        created_on,
        updated_on: created_on,
    };
    let store = service.store();
    store
        .users()
        .upsert(&UserSnapshot {
            id: author_id,
            username: format!("user{author_id}"),
        })
        .unwrap();
    store.reviews().insert(&review).unwrap();
    review
}

#[test]
fn test_create_and_get() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.author_id, 1);
    assert_eq!(fetched.author_username, "user1");
    assert_eq!(fetched.event_id, 10);
    assert_eq!(fetched.mark, 8);
    assert_eq!(fetched.likes, 0);
    assert_eq!(fetched.dislikes, 0);
}

#[test]
fn test_get_missing_review() {
    let service = setup_service();
    let err = service.reviews().get(&ReviewId::generate()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Review(ReviewError::NotFound)
    ));
}

#[test]
fn test_like_updates_counters_and_ledger() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    service.opinions().add(&review.id, 2, Label::Like).unwrap();
    service.opinions().add(&review.id, 3, Label::Like).unwrap();
    service.opinions().add(&review.id, 4, Label::Dislike).unwrap();

    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.likes, 2);
    assert_eq!(fetched.dislikes, 1);

    let opinions = service.store().opinions();
    assert_eq!(opinions.count_for_review(&review.id, Label::Like).unwrap(), 2);
    assert_eq!(
        opinions.count_for_review(&review.id, Label::Dislike).unwrap(),
        1
    );
}

#[test]
fn test_swap_opinion_replaces_and_restores() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    service.opinions().add(&review.id, 2, Label::Like).unwrap();
    service.opinions().add(&review.id, 2, Label::Dislike).unwrap();

    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.likes, 0);
    assert_eq!(fetched.dislikes, 1);

    service.opinions().add(&review.id, 2, Label::Like).unwrap();
    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.likes, 1);
    assert_eq!(fetched.dislikes, 0);

    // Still a single stored opinion for this evaluator.
    let opinions = service.store().opinions();
    let total = opinions.count_for_review(&review.id, Label::Like).unwrap()
        + opinions.count_for_review(&review.id, Label::Dislike).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_repeated_label_is_conflict_and_leaves_counters() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    service.opinions().add(&review.id, 2, Label::Like).unwrap();
    let err = service.opinions().add(&review.id, 2, Label::Like).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Opinion(OpinionError::AlreadyExpressed { label: Label::Like })
    ));

    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.likes, 1);
    assert_eq!(fetched.dislikes, 0);
}

#[test]
fn test_remove_mismatched_label_is_conflict() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    service.opinions().add(&review.id, 2, Label::Like).unwrap();
    let err = service
        .opinions()
        .remove(&review.id, 2, Label::Dislike)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Opinion(OpinionError::LabelMismatch {
            stored: Label::Like,
            requested: Label::Dislike,
        })
    ));

    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.likes, 1);
}

#[test]
fn test_remove_opinion() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    service.opinions().add(&review.id, 2, Label::Dislike).unwrap();
    service
        .opinions()
        .remove(&review.id, 2, Label::Dislike)
        .unwrap();

    let fetched = service.reviews().get(&review.id).unwrap();
    assert_eq!(fetched.dislikes, 0);
    assert_eq!(
        service
            .store()
            .opinions()
            .count_for_review(&review.id, Label::Dislike)
            .unwrap(),
        0
    );
}

#[test]
fn test_remove_absent_opinion_is_not_found() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    let err = service
        .opinions()
        .remove(&review.id, 2, Label::Like)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Opinion(OpinionError::OpinionNotFound)
    ));
}

#[test]
fn test_own_review_opinion_forbidden() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    let err = service.opinions().add(&review.id, 1, Label::Like).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Opinion(OpinionError::OwnReview)
    ));
}

#[test]
fn test_delete_cascades_opinions() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);
    service.opinions().add(&review.id, 2, Label::Like).unwrap();

    service.reviews().delete(&review.id, 1).unwrap();

    let opinions = service.store().opinions();
    assert_eq!(opinions.get(&review.id, 2).unwrap(), None);
    assert_eq!(opinions.count_for_review(&review.id, Label::Like).unwrap(), 0);
}

#[test]
fn test_delete_by_other_user_forbidden() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 8);

    let err = service.reviews().delete(&review.id, 2).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Review(ReviewError::NoAccess)
    ));
    assert!(service.reviews().get(&review.id).is_ok());
}

#[test]
fn test_partial_update_touches_only_given_fields() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 4);

    let updated = service
        .reviews()
        .update(
            &review.id,
            1,
            UpdateReviewInput {
                username: None,
                title: None,
                content: None,
                mark: Some(9),
            },
        )
        .unwrap();

    assert_eq!(updated.mark, 9);
    assert_eq!(updated.content, review.content);
    assert_eq!(updated.author_username, review.author_username);
    assert_eq!(updated.created_on, review.created_on);
    assert!(updated.updated_on >= review.updated_on);
}

#[test]
fn test_update_by_other_author_not_found() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 4);

    let err = service
        .reviews()
        .update(
            &review.id,
            2,
            UpdateReviewInput {
                username: None,
                title: None,
                content: None,
                mark: Some(9),
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Review(ReviewError::NotFound)
    ));
}

#[test]
fn test_update_username_propagates_to_user_record() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 7);
    let other = add_review(&service, 1, 11, 6);

    service
        .reviews()
        .update(
            &review.id,
            1,
            UpdateReviewInput {
                username: Some("renamed".to_string()),
                title: None,
                content: None,
                mark: None,
            },
        )
        .unwrap();

    // Username lives on the user record, so every review by the author sees it.
    let fetched = service.reviews().get(&other.id).unwrap();
    assert_eq!(fetched.author_username, "renamed");
}

#[test]
fn test_list_by_event_paging_newest_first() {
    let service = setup_service();
    for i in 0..5 {
        insert_review_at(&service, 1, 10, 7, i);
    }
    insert_review_at(&service, 1, 99, 7, 100);

    let first_page = service.reviews().list_by_event(10, 0, 2).unwrap();
    assert_eq!(first_page.len(), 2);
    assert!(first_page[0].created_on > first_page[1].created_on);

    let last_page = service.reviews().list_by_event(10, 2, 2).unwrap();
    assert_eq!(last_page.len(), 1);

    let empty = service.reviews().list_by_event(42, 0, 10).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_event_average_mark_truncated() {
    let service = setup_service();
    add_review(&service, 1, 10, 7);
    add_review(&service, 2, 10, 7);
    add_review(&service, 3, 10, 8);

    let average = service.analytics().event_average_mark(10).unwrap();
    // 22 / 3 = 7.333..., truncated to one decimal.
    assert_eq!(average.average_mark, Some(7.3));
}

#[test]
fn test_event_average_over_spread_of_marks() {
    let service = setup_service();
    for (author, mark) in [1, 2, 3, 4, 7, 8, 9, 10, 10].into_iter().enumerate() {
        add_review(&service, author as i64 + 1, 10, mark);
    }

    let average = service.analytics().event_average_mark(10).unwrap();
    // 54 / 9 = 6.0 with nothing to truncate away.
    assert_eq!(average.average_mark, Some(6.0));
}

#[test]
fn test_event_average_mark_absent_without_reviews() {
    let service = setup_service();
    let average = service.analytics().event_average_mark(10).unwrap();
    assert_eq!(average.average_mark, None);
}

#[test]
fn test_author_average_mark_spans_events() {
    let service = setup_service();
    add_review(&service, 1, 10, 6);
    add_review(&service, 1, 11, 9);
    add_review(&service, 2, 10, 1);

    let average = service.analytics().author_average_mark(1).unwrap();
    assert_eq!(average.average_mark, Some(7.5));
}

#[test]
fn test_low_trust_review_excluded_from_average() {
    let service = setup_service();
    let distrusted = add_review(&service, 1, 10, 10);
    add_review(&service, 2, 10, 4);

    // 11 opinions total, dislikes ahead: the review no longer counts.
    for evaluator in 3..14 {
        service
            .opinions()
            .add(&distrusted.id, evaluator, Label::Dislike)
            .unwrap();
    }

    let average = service.analytics().event_average_mark(10).unwrap();
    assert_eq!(average.average_mark, Some(4.0));
}

#[test]
fn test_engagement_at_limit_still_counts() {
    let service = setup_service();
    let review = add_review(&service, 1, 10, 10);
    add_review(&service, 2, 10, 4);

    // Exactly 10 opinions does not cross the engagement limit.
    for evaluator in 3..13 {
        service
            .opinions()
            .add(&review.id, evaluator, Label::Dislike)
            .unwrap();
    }

    let average = service.analytics().event_average_mark(10).unwrap();
    assert_eq!(average.average_mark, Some(7.0));
}

#[test]
fn test_indicators_absent_without_reviews() {
    let service = setup_service();
    let indicators = service.analytics().event_indicators(10).unwrap();
    assert_eq!(indicators.number_of_reviews, None);
    assert_eq!(indicators.positive_percent, None);
    assert_eq!(indicators.negative_percent, None);
}

#[test]
fn test_indicators_mixed_percentages_truncated() {
    let service = setup_service();
    for author in 1..6 {
        add_review(&service, author, 10, 8);
    }
    for author in 6..10 {
        add_review(&service, author, 10, 3);
    }

    let indicators = service.analytics().event_indicators(10).unwrap();
    assert_eq!(indicators.number_of_reviews, Some(9));
    assert_eq!(indicators.positive_percent, Some(55.5));
    assert_eq!(indicators.negative_percent, Some(44.4));
}

#[test]
fn test_indicators_single_positive_review() {
    let service = setup_service();
    add_review(&service, 1, 10, 9);

    let indicators = service.analytics().event_indicators(10).unwrap();
    assert_eq!(indicators.number_of_reviews, Some(1));
    assert_eq!(indicators.positive_percent, Some(100.0));
    assert_eq!(indicators.negative_percent, Some(0.0));
}

#[test]
fn test_best_and_worst_capped_at_three() {
    let service = setup_service();
    for (author, mark) in [(1, 10), (2, 9), (3, 8), (4, 7), (5, 6)] {
        insert_review_at(&service, author, 10, mark, author);
    }
    for (author, mark) in [(6, 1), (7, 2), (8, 3), (9, 4)] {
        insert_review_at(&service, author, 10, mark, author);
    }

    let lists = service.analytics().best_and_worst_reviews(10).unwrap();
    assert_eq!(lists.best_reviews.len(), 3);
    assert_eq!(
        lists.best_reviews.iter().map(|r| r.mark).collect::<Vec<_>>(),
        vec![10, 9, 8]
    );
    assert_eq!(lists.worst_reviews.len(), 3);
    assert_eq!(
        lists
            .worst_reviews
            .iter()
            .map(|r| r.mark)
            .collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_best_and_worst_middling_marks_left_out() {
    let service = setup_service();
    // Mark 5 is not positive (needs mark > 5) but does count as negative (mark < 6).
    add_review(&service, 1, 10, 5);

    let lists = service.analytics().best_and_worst_reviews(10).unwrap();
    assert!(lists.best_reviews.is_empty());
    assert_eq!(lists.worst_reviews.len(), 1);
}
