use std::str::FromStr;

use anyhow::{Context, Result};

use crate::id::DEFAULT_ID_LENGTH;

/// Which [`LinkStore`](crate::store::LinkStore) backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND '{other}' (expected sqlite or memory)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:./tinylink.db"
    pub database_url: String,

    pub store_backend: StoreBackend,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    pub port: u16,

    /// Public base URL used to compose `shortUrl`, e.g. "https://go.example.com".
    /// Never has a trailing slash.
    pub base_url: String,

    /// Length of generated short ids.
    pub id_length: usize,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = get("PORT")
            .unwrap_or_else(|| "4000".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let store_backend = get("STORE_BACKEND")
            .unwrap_or_else(|| "sqlite".into())
            .parse::<StoreBackend>()?;

        let id_length = match get("ID_LENGTH") {
            Some(raw) => raw
                .parse::<usize>()
                .context("ID_LENGTH must be a positive integer")?,
            None => DEFAULT_ID_LENGTH,
        };
        if !(4..=32).contains(&id_length) {
            anyhow::bail!("ID_LENGTH must be between 4 and 32, got {id_length}");
        }

        let base_url = get("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| "sqlite:./tinylink.db".into()),
            store_backend,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            base_url,
            id_length,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
