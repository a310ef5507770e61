use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Secret used when `WARBLER_SECRET_KEY` is unset. Fine for local work only.
pub const PLACEHOLDER_SECRET: &str = "it's a secret";

pub const DEFAULT_LOG_FILTER: &str =
    "warbler_server=debug,warbler_web=debug,warbler_db=info,tower_http=debug";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub secret_key: String,
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read `WARBLER_*` variables, falling back to development defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let db_path = env::var("WARBLER_DB_PATH").unwrap_or_else(|_| "warbler.db".into());
        let secret_key = env::var("WARBLER_SECRET_KEY").unwrap_or_else(|_| PLACEHOLDER_SECRET.into());
        let host = env::var("WARBLER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env::var("WARBLER_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .context("WARBLER_PORT must be a port number")?;
        let static_dir = env::var("WARBLER_STATIC_DIR").unwrap_or_else(|_| "static".into());

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        Ok(Self {
            db_path: PathBuf::from(db_path),
            secret_key,
            addr,
            static_dir: PathBuf::from(static_dir),
        })
    }

    pub fn uses_placeholder_secret(&self) -> bool {
        self.secret_key == PLACEHOLDER_SECRET
    }
}
