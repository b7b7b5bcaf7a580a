use crate::util::{decode_enum, encode_enum};
use rusqlite::Connection;
use rvd_core::error::OpinionError;
use rvd_core::opinions::OpinionRepository;
use rvd_core::types::{Label, Opinion, OpinionId, ReviewId, UserId};
use std::str::FromStr;

pub struct OpinionRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> OpinionRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> OpinionRepository for OpinionRepo<'a> {
    fn get(
        &self,
        review_id: &ReviewId,
        evaluator_id: UserId,
    ) -> Result<Option<Opinion>, OpinionError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, review_id, evaluator_id, label FROM opinions \
                 WHERE review_id = ?1 AND evaluator_id = ?2",
            )
            .map_err(storage)?;
        let mut rows = stmt
            .query((review_id.as_str(), evaluator_id))
            .map_err(storage)?;
        let Some(row) = rows.next().map_err(storage)? else {
            return Ok(None);
        };
        map_opinion_row(row).map(Some)
    }

    fn insert(&self, opinion: &Opinion) -> Result<(), OpinionError> {
        let sql = "INSERT INTO opinions (id, review_id, evaluator_id, label) \
             VALUES (?1, ?2, ?3, ?4)";
        let params = (
            opinion.id.as_str(),
            opinion.review_id.as_str(),
            opinion.evaluator_id,
            encode_enum(&opinion.label).map_err(|err| OpinionError::Storage {
                message: err.to_string(),
            })?,
        );
        self.conn.execute(sql, params).map_err(storage)?;
        Ok(())
    }

    fn delete(&self, id: &OpinionId) -> Result<(), OpinionError> {
        let affected = self
            .conn
            .execute("DELETE FROM opinions WHERE id = ?1", [id.as_str()])
            .map_err(storage)?;
        if affected == 0 {
            return Err(OpinionError::OpinionNotFound);
        }
        Ok(())
    }

    fn count_for_review(&self, review_id: &ReviewId, label: Label) -> Result<i64, OpinionError> {
        let label = encode_enum(&label).map_err(|err| OpinionError::Storage {
            message: err.to_string(),
        })?;
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM opinions WHERE review_id = ?1 AND label = ?2",
                (review_id.as_str(), label),
                |row| row.get(0),
            )
            .map_err(storage)
    }
}

fn storage(err: rusqlite::Error) -> OpinionError {
    OpinionError::Storage {
        message: err.to_string(),
    }
}

fn map_opinion_row(row: &rusqlite::Row<'_>) -> Result<Opinion, OpinionError> {
    let id: String = row.get(0).map_err(storage)?;
    let review_id: String = row.get(1).map_err(storage)?;
    let evaluator_id: i64 = row.get(2).map_err(storage)?;
    let label: String = row.get(3).map_err(storage)?;

    Ok(Opinion {
        id: OpinionId::from_str(&id).map_err(|err| OpinionError::Storage {
            message: err.to_string(),
        })?,
        review_id: ReviewId::from_str(&review_id).map_err(|err| OpinionError::Storage {
            message: err.to_string(),
        })?,
        evaluator_id,
        label: decode_enum(&label).map_err(|err| OpinionError::Storage {
            message: err.to_string(),
        })?,
    })
}
