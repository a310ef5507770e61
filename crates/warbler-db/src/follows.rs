use rusqlite::params;

use crate::models::UserRow;
use crate::users::{USER_COLUMNS, user_from_row};
use crate::{Database, Result};

impl Database {
    /// Record that `follower_id` follows `followed_id`.
    /// Returns false when the edge already existed.
    pub fn follow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            // Only the duplicate edge is skipped; FK and CHECK failures still raise
            let affected = conn.execute(
                "INSERT INTO follows (user_being_followed_id, user_following_id)
                 VALUES (?1, ?2)
                 ON CONFLICT (user_being_followed_id, user_following_id) DO NOTHING",
                params![followed_id, follower_id],
            )?;
            Ok(affected > 0)
        })
    }

    pub fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM follows WHERE user_being_followed_id = ?1 AND user_following_id = ?2",
                params![followed_id, follower_id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Users that `user_id` follows.
    pub fn following(&self, user_id: i64) -> Result<Vec<UserRow>> {
        self.related_users(
            "SELECT user_being_followed_id FROM follows WHERE user_following_id = ?1",
            user_id,
        )
    }

    /// Users following `user_id`.
    pub fn followers(&self, user_id: i64) -> Result<Vec<UserRow>> {
        self.related_users(
            "SELECT user_following_id FROM follows WHERE user_being_followed_id = ?1",
            user_id,
        )
    }

    pub fn is_following(&self, user_id: i64, other_id: i64) -> Result<bool> {
        self.follow_edge_exists(user_id, other_id)
    }

    pub fn is_followed_by(&self, user_id: i64, other_id: i64) -> Result<bool> {
        self.follow_edge_exists(other_id, user_id)
    }

    fn follow_edge_exists(&self, follower_id: i64, followed_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM follows
                    WHERE user_being_followed_id = ?1 AND user_following_id = ?2
                 )",
                params![followed_id, follower_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    fn related_users(&self, id_query: &str, user_id: i64) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id IN ({id_query}) ORDER BY id"
            ))?;
            let rows = stmt
                .query_map([user_id], user_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }
}
