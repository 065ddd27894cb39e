use anyhow::{Context, Result};

const DEFAULT_DB_POOL_SIZE: u32 = 10;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_pool_size: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_pool_size: parse_db_pool_size(std::env::var("DB_POOL_SIZE").ok().as_deref())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_db_pool_size(raw: Option<&str>) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_DB_POOL_SIZE);
    };
    let size = raw
        .parse::<u32>()
        .context("DB_POOL_SIZE must be a positive integer")?;
    if size == 0 {
        anyhow::bail!("DB_POOL_SIZE must be at least 1");
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_defaults_when_unset() {
        assert_eq!(parse_db_pool_size(None).unwrap(), DEFAULT_DB_POOL_SIZE);
    }

    #[test]
    fn test_pool_size_parses_explicit_value() {
        assert_eq!(parse_db_pool_size(Some("25")).unwrap(), 25);
    }

    #[test]
    fn test_pool_size_rejects_zero() {
        assert!(parse_db_pool_size(Some("0")).is_err());
    }

    #[test]
    fn test_pool_size_rejects_non_numeric() {
        assert!(parse_db_pool_size(Some("lots")).is_err());
    }
}
