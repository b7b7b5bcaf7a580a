use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Polarity of an opinion on a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Like,
    Dislike,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "LIKE"),
            Self::Dislike => write!(f, "DISLIKE"),
        }
    }
}
