use chrono::{SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params};

use crate::models::MessageRow;
use crate::{Database, Result};

/// Message columns joined with the author's username and avatar.
pub(crate) const MESSAGE_SELECT: &str =
    "SELECT m.id, m.text, m.timestamp, m.user_id, u.username, u.image_url
     FROM messages m
     JOIN users u ON m.user_id = u.id";

impl Database {
    /// Insert a message stamped with the current UTC time.
    ///
    /// Empty or over-long text and unknown authors are integrity errors.
    pub fn create_message(&self, user_id: i64, text: &str) -> Result<MessageRow> {
        // Same millisecond RFC 3339 shape as the column default, so stored
        // timestamps compare chronologically as text
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        self.with_conn(|conn| {
            let id: i64 = conn.query_row(
                "INSERT INTO messages (text, timestamp, user_id) VALUES (?1, ?2, ?3) RETURNING id",
                params![text, timestamp, user_id],
                |row| row.get(0),
            )?;

            let row = conn.query_row(
                &format!("{MESSAGE_SELECT} WHERE m.id = ?1"),
                [id],
                message_from_row,
            )?;
            Ok(row)
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("{MESSAGE_SELECT} WHERE m.id = ?1"),
                    [id],
                    message_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// The user's own messages, newest first.
    pub fn messages_for_user(&self, user_id: i64, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MESSAGE_SELECT}
                 WHERE m.user_id = ?1
                 ORDER BY m.timestamp DESC, m.id DESC
                 LIMIT ?2"
            ))?;

            let rows = stmt
                .query_map(params![user_id, limit], message_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// Home timeline: the user's messages plus those of everyone they follow.
    pub fn timeline(&self, user_id: i64, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MESSAGE_SELECT}
                 WHERE m.user_id = ?1
                    OR m.user_id IN (
                        SELECT user_being_followed_id FROM follows WHERE user_following_id = ?1
                    )
                 ORDER BY m.timestamp DESC, m.id DESC
                 LIMIT ?2"
            ))?;

            let rows = stmt
                .query_map(params![user_id, limit], message_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    pub fn delete_message(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

pub(crate) fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        text: row.get(1)?,
        timestamp: row.get(2)?,
        user_id: row.get(3)?,
        author_username: row.get(4)?,
        author_image_url: row.get(5)?,
    })
}
