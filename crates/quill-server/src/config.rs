use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Duration;

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is loaded first if present).
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    /// `None` means sessions never expire, which is the historical behavior.
    pub session_ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("QUILL_PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .context("QUILL_PORT must be a port number")?;
        let data_dir: PathBuf = std::env::var("QUILL_DATA_DIR")
            .unwrap_or_else(|_| "data".into())
            .into();
        let static_dir: PathBuf = std::env::var("QUILL_STATIC_DIR")
            .unwrap_or_else(|_| "static".into())
            .into();
        let session_ttl = match std::env::var("QUILL_SESSION_TTL_SECS") {
            Ok(raw) => {
                let secs: i64 = raw
                    .parse()
                    .context("QUILL_SESSION_TTL_SECS must be a number of seconds")?;
                Some(Duration::seconds(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            static_dir,
            session_ttl,
        })
    }
}
