use crate::util::{from_rfc3339, to_rfc3339};
use rusqlite::Connection;
use rvd_core::error::ReviewError;
use rvd_core::reviews::ReviewRepository;
use rvd_core::types::{EventId, Review, ReviewId, UserId};
use std::str::FromStr;

const SELECT_REVIEW: &str = "SELECT r.id, r.author_id, u.username, r.event_id, r.title, \
     r.content, r.mark, r.likes, r.dislikes, r.created_on, r.updated_on \
     FROM reviews r JOIN users u ON u.id = r.author_id";

pub struct ReviewRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn select_many(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Review>, ReviewError> {
        let mut stmt = self.conn.prepare(sql).map_err(storage)?;
        let mut rows = stmt.query(params).map_err(storage)?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next().map_err(storage)? {
            reviews.push(map_review_row(row)?);
        }
        Ok(reviews)
    }

    fn select_one(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Option<Review>, ReviewError> {
        let mut stmt = self.conn.prepare(sql).map_err(storage)?;
        let mut rows = stmt.query(params).map_err(storage)?;
        let Some(row) = rows.next().map_err(storage)? else {
            return Ok(None);
        };
        map_review_row(row).map(Some)
    }
}

impl<'a> ReviewRepository for ReviewRepo<'a> {
    fn insert(&self, review: &Review) -> Result<(), ReviewError> {
        let sql = "INSERT INTO reviews (id, author_id, event_id, title, content, mark, likes, \
             dislikes, created_on, updated_on) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
        let params = (
            review.id.as_str(),
            review.author_id,
            review.event_id,
            review.title.clone(),
            review.content.clone(),
            review.mark,
            review.likes,
            review.dislikes,
            to_rfc3339(&review.created_on),
            to_rfc3339(&review.updated_on),
        );
        self.conn.execute(sql, params).map_err(storage)?;
        Ok(())
    }

    fn get(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError> {
        let sql = format!("{SELECT_REVIEW} WHERE r.id = ?1");
        self.select_one(&sql, [id.as_str()])
    }

    fn get_for_author(
        &self,
        id: &ReviewId,
        author_id: UserId,
    ) -> Result<Option<Review>, ReviewError> {
        let sql = format!("{SELECT_REVIEW} WHERE r.id = ?1 AND r.author_id = ?2");
        self.select_one(&sql, (id.as_str(), author_id))
    }

    fn list_by_event(
        &self,
        event_id: EventId,
        page: u32,
        size: u32,
    ) -> Result<Vec<Review>, ReviewError> {
        let sql = format!(
            "{SELECT_REVIEW} WHERE r.event_id = ?1 ORDER BY r.created_on DESC LIMIT ?2 OFFSET ?3"
        );
        let offset = i64::from(page) * i64::from(size);
        self.select_many(&sql, (event_id, i64::from(size), offset))
    }

    fn update(&self, review: &Review) -> Result<(), ReviewError> {
        let sql = "UPDATE reviews SET title = ?1, content = ?2, mark = ?3, updated_on = ?4 \
             WHERE id = ?5";
        let params = (
            review.title.clone(),
            review.content.clone(),
            review.mark,
            to_rfc3339(&review.updated_on),
            review.id.as_str(),
        );
        let affected = self.conn.execute(sql, params).map_err(storage)?;
        if affected == 0 {
            return Err(ReviewError::NotFound);
        }
        Ok(())
    }

    fn adjust_counters(
        &self,
        id: &ReviewId,
        likes_delta: i64,
        dislikes_delta: i64,
    ) -> Result<(), ReviewError> {
        let sql = "UPDATE reviews SET likes = likes + ?1, dislikes = dislikes + ?2 WHERE id = ?3";
        let affected = self
            .conn
            .execute(sql, (likes_delta, dislikes_delta, id.as_str()))
            .map_err(storage)?;
        if affected == 0 {
            return Err(ReviewError::NotFound);
        }
        Ok(())
    }

    fn delete(&self, id: &ReviewId) -> Result<(), ReviewError> {
        let affected = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1", [id.as_str()])
            .map_err(storage)?;
        if affected == 0 {
            return Err(ReviewError::NotFound);
        }
        Ok(())
    }

    fn average_mark_for_event(
        &self,
        event_id: EventId,
        engagement_limit: i64,
    ) -> Result<Option<f64>, ReviewError> {
        let sql = "SELECT AVG(CAST(mark AS REAL)) FROM reviews \
             WHERE event_id = ?1 AND NOT (likes + dislikes > ?2 AND dislikes > likes)";
        self.conn
            .query_row(sql, (event_id, engagement_limit), |row| row.get(0))
            .map_err(storage)
    }

    fn average_mark_for_author(
        &self,
        author_id: UserId,
        engagement_limit: i64,
    ) -> Result<Option<f64>, ReviewError> {
        let sql = "SELECT AVG(CAST(mark AS REAL)) FROM reviews \
             WHERE author_id = ?1 AND NOT (likes + dislikes > ?2 AND dislikes > likes)";
        self.conn
            .query_row(sql, (author_id, engagement_limit), |row| row.get(0))
            .map_err(storage)
    }

    fn count_with_mark_below(&self, event_id: EventId, ceiling: i64) -> Result<i64, ReviewError> {
        let sql = "SELECT COUNT(*) FROM reviews WHERE event_id = ?1 AND mark < ?2";
        self.conn
            .query_row(sql, (event_id, ceiling), |row| row.get(0))
            .map_err(storage)
    }

    fn count_with_mark_above(&self, event_id: EventId, floor: i64) -> Result<i64, ReviewError> {
        let sql = "SELECT COUNT(*) FROM reviews WHERE event_id = ?1 AND mark > ?2";
        self.conn
            .query_row(sql, (event_id, floor), |row| row.get(0))
            .map_err(storage)
    }

    fn best_for_event(
        &self,
        event_id: EventId,
        mark_floor: i64,
        limit: u32,
    ) -> Result<Vec<Review>, ReviewError> {
        let sql = format!(
            "{SELECT_REVIEW} WHERE r.event_id = ?1 AND r.mark > ?2 \
             ORDER BY r.mark DESC, r.created_on DESC LIMIT ?3"
        );
        self.select_many(&sql, (event_id, mark_floor, i64::from(limit)))
    }

    fn worst_for_event(
        &self,
        event_id: EventId,
        mark_ceiling: i64,
        limit: u32,
    ) -> Result<Vec<Review>, ReviewError> {
        let sql = format!(
            "{SELECT_REVIEW} WHERE r.event_id = ?1 AND r.mark < ?2 \
             ORDER BY r.mark ASC, r.created_on DESC LIMIT ?3"
        );
        self.select_many(&sql, (event_id, mark_ceiling, i64::from(limit)))
    }
}

fn storage(err: rusqlite::Error) -> ReviewError {
    ReviewError::Storage {
        message: err.to_string(),
    }
}

fn map_review_row(row: &rusqlite::Row<'_>) -> Result<Review, ReviewError> {
    let id: String = row.get(0).map_err(storage)?;
    let author_id: i64 = row.get(1).map_err(storage)?;
    let author_username: String = row.get(2).map_err(storage)?;
    let event_id: i64 = row.get(3).map_err(storage)?;
    let title: Option<String> = row.get(4).map_err(storage)?;
    let content: String = row.get(5).map_err(storage)?;
    let mark: i64 = row.get(6).map_err(storage)?;
    let likes: i64 = row.get(7).map_err(storage)?;
    let dislikes: i64 = row.get(8).map_err(storage)?;
    let created_on: String = row.get(9).map_err(storage)?;
    let updated_on: String = row.get(10).map_err(storage)?;

    let id = ReviewId::from_str(&id).map_err(|err| ReviewError::Storage {
        message: err.to_string(),
    })?;

    Ok(Review {
        id,
        author_id,
        author_username,
        event_id,
        title,
        content,
        mark,
        likes,
        dislikes,
        created_on: from_rfc3339(&created_on).map_err(|err| ReviewError::Storage {
            message: err.to_string(),
        })?,
        updated_on: from_rfc3339(&updated_on).map_err(|err| ReviewError::Storage {
            message: err.to_string(),
        })?,
    })
}
