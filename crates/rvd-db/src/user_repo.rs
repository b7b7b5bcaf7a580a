use rusqlite::Connection;
use rvd_core::error::ReviewError;
use rvd_core::types::UserSnapshot;
use rvd_core::users::UserRepository;

pub struct UserRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> UserRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> UserRepository for UserRepo<'a> {
    fn upsert(&self, user: &UserSnapshot) -> Result<(), ReviewError> {
        let sql = "INSERT INTO users (id, username) VALUES (?1, ?2) \
             ON CONFLICT (id) DO UPDATE SET username = excluded.username";
        self.conn
            .execute(sql, (user.id, user.username.clone()))
            .map_err(|err| ReviewError::Storage {
                message: err.to_string(),
            })?;
        Ok(())
    }
}
