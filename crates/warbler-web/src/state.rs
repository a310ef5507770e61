use std::path::PathBuf;
use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use warbler_db::Database;

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// Signs the session cookie.
    pub key: Key,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(db: Database, secret_key: &str, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            db: Arc::new(db),
            key: signing_key(secret_key),
            static_dir: static_dir.into(),
        }
    }
}

/// Cookie keys need 64 bytes of material; SHA-512 stretches any secret to that.
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}
