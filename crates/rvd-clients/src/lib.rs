//! HTTP clients for the two upstream collaborators: the event catalog and
//! the registration service. Both translate transport outcomes into the
//! core's [`LookupError`] so the eligibility gate sees a uniform contract.

use reqwest::StatusCode;
use rvd_core::eligibility::LookupError;
use rvd_core::types::{EventId, EventSnapshot, UserId};

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const REVIEW_USER_ID_HEADER: &str = "X-Review-User-Id";

#[derive(Clone)]
pub struct EventCatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl EventCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base(base_url.into()),
            http: reqwest::Client::new(),
        }
    }

    pub async fn event_by_id(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<EventSnapshot, LookupError> {
        let url = format!("{}/events/{event_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(USER_ID_HEADER, user_id.to_string())
            .send()
            .await
            .map_err(unavailable)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status if status.is_success() => response.json().await.map_err(unavailable),
            status => {
                log::error!("event lookup for {event_id} returned {status}");
                Err(LookupError::Unavailable {
                    message: format!("event lookup returned {status}"),
                })
            }
        }
    }
}

#[derive(Clone)]
pub struct RegistrationClient {
    base_url: String,
    http: reqwest::Client,
}

impl RegistrationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base(base_url.into()),
            http: reqwest::Client::new(),
        }
    }

    pub async fn registration_status(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<String, LookupError> {
        let url = format!(
            "{}/registrations/internal/status-of-registration/{event_id}",
            self.base_url
        );
        let response = self
            .http
            .get(&url)
            .header(REVIEW_USER_ID_HEADER, user_id.to_string())
            .send()
            .await
            .map_err(unavailable)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status if status.is_success() => {
                let body = response.text().await.map_err(unavailable)?;
                // The registration service answers with a bare status string;
                // tolerate a JSON-quoted rendition as well.
                Ok(body.trim().trim_matches('"').to_string())
            }
            status => {
                log::error!("registration lookup for event {event_id} returned {status}");
                Err(LookupError::Unavailable {
                    message: format!("registration lookup returned {status}"),
                })
            }
        }
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn unavailable(err: reqwest::Error) -> LookupError {
    LookupError::Unavailable {
        message: err.to_string(),
    }
}
