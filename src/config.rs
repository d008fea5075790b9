use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` runs the API on the in-memory store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub concurrency_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw.parse::<u16>()?,
            None => 5500,
        };
        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);
        let concurrency_limit = lookup("CONCURRENCY_LIMIT")
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(100);
        Ok(Self {
            database_url,
            host,
            port,
            body_limit_bytes,
            concurrency_limit,
        })
    }
}
