use std::collections::HashSet;

use rusqlite::params;

use crate::messages::{MESSAGE_SELECT, message_from_row};
use crate::models::{LikesRow, MessageRow};
use crate::{Database, Result};

impl Database {
    /// Returns false when the user already liked the message.
    pub fn add_like(&self, user_id: i64, message_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "INSERT INTO likes (user_id, message_id) VALUES (?1, ?2)
                 ON CONFLICT (user_id, message_id) DO NOTHING",
                params![user_id, message_id],
            )?;
            Ok(affected > 0)
        })
    }

    pub fn remove_like(&self, user_id: i64, message_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM likes WHERE user_id = ?1 AND message_id = ?2",
                params![user_id, message_id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Messages the user liked, most recently liked first.
    pub fn liked_messages(&self, user_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MESSAGE_SELECT}
                 JOIN likes l ON l.message_id = m.id
                 WHERE l.user_id = ?1
                 ORDER BY l.id DESC"
            ))?;
            let rows = stmt
                .query_map([user_id], message_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    pub fn liked_message_ids(&self, user_id: i64) -> Result<HashSet<i64>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT message_id FROM likes WHERE user_id = ?1")?;
            let ids = stmt
                .query_map([user_id], |row| row.get(0))?
                .collect::<rusqlite::Result<HashSet<i64>>>()?;
            Ok(ids)
        })
    }

    pub fn likes_for_user(&self, user_id: i64) -> Result<Vec<LikesRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, user_id, message_id FROM likes WHERE user_id = ?1 ORDER BY id")?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(LikesRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        message_id: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }
}
