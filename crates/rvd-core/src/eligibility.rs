use crate::error::EligibilityError;
use crate::types::{EventId, EventSnapshot};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Registration status an author must hold to post a review.
pub const APPROVED_STATUS: &str = "APPROVED";

/// Outcome of an upstream lookup, as reported by a client. The gate maps
/// these into the error taxonomy; raw transport errors never leak past it.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("not found")]
    NotFound,
    #[error("upstream unavailable: {message}")]
    Unavailable { message: String },
}

/// Admits a review only for events that exist and have concluded.
///
/// A NotFound from the catalog is a creation-time conflict, not a
/// NotFound: the caller is not querying the event directly.
pub fn check_event(
    outcome: Result<EventSnapshot, LookupError>,
    event_id: EventId,
    now: DateTime<Utc>,
) -> Result<EventSnapshot, EligibilityError> {
    let event = match outcome {
        Ok(event) => event,
        Err(LookupError::NotFound) => {
            log::error!("review for event {event_id} rejected: event not found");
            return Err(EligibilityError::EventNotFound { event_id });
        }
        Err(LookupError::Unavailable { message }) => {
            return Err(EligibilityError::Upstream { message });
        }
    };
    if event.end_date_time > now {
        log::error!("review for event {event_id} rejected: event not completed");
        return Err(EligibilityError::EventNotCompleted { event_id });
    }
    Ok(event)
}

/// Requires an APPROVED registration of the author to the event.
pub fn check_registration(
    outcome: Result<String, LookupError>,
    event_id: EventId,
) -> Result<(), EligibilityError> {
    match outcome {
        Ok(status) if status == APPROVED_STATUS => Ok(()),
        Ok(status) => {
            log::error!("review for event {event_id} rejected: registration status {status}");
            Err(EligibilityError::RegistrationNotApproved { event_id, status })
        }
        Err(LookupError::NotFound) => {
            log::error!("review for event {event_id} rejected: registration not found");
            Err(EligibilityError::RegistrationNotFound { event_id })
        }
        Err(LookupError::Unavailable { message }) => Err(EligibilityError::Upstream { message }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(end_offset: Duration) -> EventSnapshot {
        EventSnapshot {
            id: 5,
            name: None,
            start_date_time: None,
            end_date_time: Utc::now() + end_offset,
            owner_id: None,
        }
    }

    #[test]
    fn concluded_event_passes() {
        let result = check_event(Ok(event(Duration::hours(-1))), 5, Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn event_ending_exactly_now_passes() {
        let now = Utc::now();
        let mut snapshot = event(Duration::zero());
        snapshot.end_date_time = now;
        assert!(check_event(Ok(snapshot), 5, now).is_ok());
    }

    #[test]
    fn running_event_is_conflict() {
        let result = check_event(Ok(event(Duration::hours(2))), 5, Utc::now());
        assert!(matches!(
            result,
            Err(EligibilityError::EventNotCompleted { event_id: 5 })
        ));
    }

    #[test]
    fn missing_event_is_conflict_not_not_found() {
        let result = check_event(Err(LookupError::NotFound), 5, Utc::now());
        assert!(matches!(
            result,
            Err(EligibilityError::EventNotFound { event_id: 5 })
        ));
    }

    #[test]
    fn catalog_outage_surfaces_as_upstream() {
        let result = check_event(
            Err(LookupError::Unavailable {
                message: "connection refused".to_string(),
            }),
            5,
            Utc::now(),
        );
        assert!(matches!(result, Err(EligibilityError::Upstream { .. })));
    }

    #[test]
    fn approved_registration_passes() {
        assert!(check_registration(Ok("APPROVED".to_string()), 5).is_ok());
    }

    #[test]
    fn pending_registration_is_forbidden() {
        let result = check_registration(Ok("PENDING".to_string()), 5);
        assert!(matches!(
            result,
            Err(EligibilityError::RegistrationNotApproved { .. })
        ));
    }

    #[test]
    fn missing_registration_is_forbidden() {
        let result = check_registration(Err(LookupError::NotFound), 5);
        assert!(matches!(
            result,
            Err(EligibilityError::RegistrationNotFound { event_id: 5 })
        ));
    }
}
