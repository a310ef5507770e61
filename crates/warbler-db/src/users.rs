use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::models::{DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL, ProfileUpdate, UserRow, UserStats};
use crate::{Database, DbError, Result};

pub(crate) const USER_COLUMNS: &str =
    "id, email, username, image_url, header_image_url, bio, location, password";

impl Database {
    /// Hash the password with Argon2id and insert the user.
    ///
    /// An empty password is refused before anything is written. Duplicate or
    /// empty usernames and emails surface as [`DbError::Integrity`].
    pub fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        image_url: Option<&str>,
    ) -> Result<UserRow> {
        if password.is_empty() {
            return Err(DbError::EmptyPassword);
        }

        // Hash outside the connection lock
        let password_hash = hash_password(password)?;
        let image_url = image_url.unwrap_or(DEFAULT_IMAGE_URL);

        self.with_conn(|conn| {
            let user = conn.query_row(
                &format!(
                    "INSERT INTO users (username, email, password, image_url)
                     VALUES (?1, ?2, ?3, ?4)
                     RETURNING {USER_COLUMNS}"
                ),
                params![username, email, password_hash, image_url],
                user_from_row,
            )?;
            Ok(user)
        })
    }

    /// Returns the user when the username exists and the password matches.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserRow>> {
        let Some(user) = self.get_user_by_username(username)? else {
            return Ok(None);
        };

        if verify_password(password, &user.password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id = ?1", id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username = ?1", username))
    }

    /// All users, or those whose username contains `search` (ASCII case-insensitive).
    pub fn list_users(&self, search: Option<&str>) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let rows = match search {
                Some(term) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {USER_COLUMNS} FROM users
                         WHERE username LIKE ?1 ESCAPE '\\'
                         ORDER BY id"
                    ))?;
                    let rows = stmt
                        .query_map([like_pattern(term)], user_from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
                None => {
                    let mut stmt =
                        conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
                    let rows = stmt
                        .query_map([], user_from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    rows
                }
            };
            Ok(rows)
        })
    }

    /// Overwrite the editable profile columns and return the updated row.
    /// Missing image URLs fall back to the defaults.
    pub fn update_profile(&self, id: i64, changes: &ProfileUpdate<'_>) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!(
                        "UPDATE users
                         SET username = ?2, email = ?3, image_url = ?4,
                             header_image_url = ?5, bio = ?6, location = ?7
                         WHERE id = ?1
                         RETURNING {USER_COLUMNS}"
                    ),
                    params![
                        id,
                        changes.username,
                        changes.email,
                        changes.image_url.unwrap_or(DEFAULT_IMAGE_URL),
                        changes.header_image_url.unwrap_or(DEFAULT_HEADER_IMAGE_URL),
                        changes.bio,
                        changes.location,
                    ],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    /// Delete the user. Messages, follows and likes go with it via cascades.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }

    pub fn user_stats(&self, id: i64) -> Result<UserStats> {
        self.with_conn(|conn| {
            let stats = conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM messages WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE user_following_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE user_being_followed_id = ?1),
                    (SELECT COUNT(*) FROM likes WHERE user_id = ?1)",
                [id],
                |row| {
                    Ok(UserStats {
                        messages: row.get(0)?,
                        following: row.get(1)?,
                        followers: row.get(2)?,
                        likes: row.get(3)?,
                    })
                },
            )?;
            Ok(stats)
        })
    }
}

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        image_url: row.get(3)?,
        header_image_url: row.get(4)?,
        bio: row.get(5)?,
        location: row.get(6)?,
        password: row.get(7)?,
    })
}

fn query_user<P: rusqlite::ToSql>(
    conn: &Connection,
    filter: &str,
    param: P,
) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}"))?;
    let row = stmt.query_row([param], user_from_row).optional()?;
    Ok(row)
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Database, UserRow, UserRow) {
        let db = Database::open_in_memory().unwrap();
        let u1 = db.signup("testuser1", "test1@test.com", "password1", None).unwrap();
        let u2 = db.signup("testuser2", "test2@test.com", "password2", None).unwrap();
        (db, u1, u2)
    }

    #[test]
    fn new_user_has_no_messages_or_followers() {
        let (db, _, _) = setup();
        let u = db.signup("testuser", "test@test.com", "HASHED_PASSWORD", None).unwrap();

        assert!(db.messages_for_user(u.id, 100).unwrap().is_empty());
        assert!(db.followers(u.id).unwrap().is_empty());
        assert_eq!(db.user_stats(u.id).unwrap(), UserStats::default());
    }

    #[test]
    fn display_shows_id_username_and_email() {
        let (_, u1, _) = setup();
        assert_eq!(
            u1.to_string(),
            format!("<User #{}: testuser1, test1@test.com>", u1.id)
        );
    }

    #[test]
    fn empty_username_is_an_integrity_error() {
        let (db, _, _) = setup();
        let err = db.signup("", "test@test.com", "password", None).unwrap_err();
        assert!(err.is_integrity(), "got {err:?}");
    }

    #[test]
    fn empty_email_is_an_integrity_error() {
        let (db, _, _) = setup();
        let err = db.signup("testuser", "", "password", None).unwrap_err();
        assert!(err.is_integrity(), "got {err:?}");
    }

    #[test]
    fn null_username_is_an_integrity_error() {
        let (db, _, _) = setup();
        let err = db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO users (username, email, password) VALUES (NULL, 'x@test.com', 'pw')",
                    [],
                )?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_integrity(), "got {err:?}");
    }

    #[test]
    fn empty_password_is_refused_before_insert() {
        let (db, _, _) = setup();
        let err = db.signup("testuser", "test@test.com", "", None).unwrap_err();
        assert!(matches!(err, DbError::EmptyPassword));
        assert!(db.get_user_by_username("testuser").unwrap().is_none());
    }

    #[test]
    fn valid_signup_hashes_password_and_defaults_image() {
        let (db, _, _) = setup();
        let user = db.signup("testuser", "test@test.com", "password", None).unwrap();

        let stored = db.get_user(user.id).unwrap().unwrap();
        assert_eq!(stored.username, "testuser");
        assert_eq!(stored.email, "test@test.com");
        assert_eq!(stored.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(stored.header_image_url, DEFAULT_HEADER_IMAGE_URL);
        assert_ne!(stored.password, "password");
        assert!(stored.password.starts_with("$argon2id$"));
    }

    #[test]
    fn signup_keeps_given_image() {
        let (db, _, _) = setup();
        let user = db
            .signup("testuser", "test@test.com", "password", Some("/img/me.png"))
            .unwrap();
        assert_eq!(user.image_url, "/img/me.png");
    }

    #[test]
    fn authenticate_returns_matching_user() {
        let (db, u1, _) = setup();
        let user = db.authenticate("testuser1", "password1").unwrap();
        assert_eq!(user, Some(u1));
    }

    #[test]
    fn authenticate_rejects_bad_password_and_unknown_user() {
        let (db, _, _) = setup();
        assert_eq!(db.authenticate("testuser1", "abcdefg").unwrap(), None);
        assert_eq!(db.authenticate("nobody", "password1").unwrap(), None);
    }

    #[test]
    fn duplicate_username_is_an_integrity_error() {
        let (db, _, _) = setup();
        let err = db.signup("testuser1", "test11@test.com", "password", None).unwrap_err();
        assert!(err.is_integrity(), "got {err:?}");
    }

    #[test]
    fn duplicate_email_is_an_integrity_error() {
        let (db, _, _) = setup();
        let err = db.signup("test", "test1@test.com", "password", None).unwrap_err();
        assert!(err.is_integrity(), "got {err:?}");
    }

    #[test]
    fn list_users_filters_by_username() {
        let (db, _, _) = setup();
        db.signup("abcdef", "abcdefg@test.com", "password4", None).unwrap();

        assert_eq!(db.list_users(None).unwrap().len(), 3);

        let found: Vec<String> = db
            .list_users(Some("USER"))
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(found, vec!["testuser1", "testuser2"]);

        // Wildcards in the term are literal
        assert!(db.list_users(Some("%")).unwrap().is_empty());
    }

    #[test]
    fn update_profile_overwrites_editable_columns() {
        let (db, u1, u2) = setup();

        let changes = ProfileUpdate {
            username: "renamed",
            email: "renamed@test.com",
            image_url: None,
            header_image_url: Some("/img/header.jpg"),
            bio: Some("Hello"),
            location: Some("Lisbon"),
        };
        let updated = db.update_profile(u1.id, &changes).unwrap().unwrap();
        assert_eq!(updated.username, "renamed");
        assert_eq!(updated.header_image_url, "/img/header.jpg");
        assert_eq!(updated.bio.as_deref(), Some("Hello"));
        assert_eq!(updated.password, u1.password);

        let clash = ProfileUpdate {
            username: "renamed",
            email: "other@test.com",
            ..Default::default()
        };
        let err = db.update_profile(u2.id, &clash).unwrap_err();
        assert!(err.is_integrity(), "got {err:?}");

        assert!(db.update_profile(9999, &changes).unwrap().is_none());
    }

    #[test]
    fn delete_user_cascades() {
        let (db, u1, u2) = setup();
        let own = db.create_message(u1.id, "mine").unwrap();
        let theirs = db.create_message(u2.id, "theirs").unwrap();
        db.follow(u1.id, u2.id).unwrap();
        db.follow(u2.id, u1.id).unwrap();
        db.add_like(u1.id, theirs.id).unwrap();
        db.add_like(u2.id, own.id).unwrap();

        assert!(db.delete_user(u1.id).unwrap());

        assert!(db.get_user(u1.id).unwrap().is_none());
        assert!(db.get_message(own.id).unwrap().is_none());
        assert!(db.followers(u2.id).unwrap().is_empty());
        assert!(db.following(u2.id).unwrap().is_empty());
        assert!(db.likes_for_user(u2.id).unwrap().is_empty());
        assert!(!db.delete_user(u1.id).unwrap());
    }
}
