use crate::types::ids::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Denormalized author display data, upserted whenever a create or update
/// supplies a username. Not an identity system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSnapshot {
    pub id: UserId,
    pub username: String,
}
