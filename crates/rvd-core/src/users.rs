use crate::error::ReviewError;
use crate::types::UserSnapshot;

pub trait UserRepository {
    fn upsert(&self, user: &UserSnapshot) -> Result<(), ReviewError>;
}
