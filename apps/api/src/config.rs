use anyhow::{bail, Context, Result};

use crate::auth::jwt::JwtConfig;

const DEFAULT_JWT_EXPIRY_MINS: i64 = 30;
const DEFAULT_SCORER_TIMEOUT_SECS: u64 = 20;
const DEFAULT_INTERVIEW_SAMPLE_SIZE: usize = 3;
const DEFAULT_PRACTICE_SAMPLE_SIZE: usize = 20;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    /// Enables the external generative scorer when present.
    pub gemini_api_key: Option<String>,
    pub scorer_timeout_secs: u64,
    pub interview_sample_size: usize,
    pub practice_sample_size: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let secret = require_env("JWT_SECRET")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            jwt: JwtConfig {
                secret,
                access_token_expiry_mins: parse_env("JWT_EXPIRY_MINS", DEFAULT_JWT_EXPIRY_MINS)?,
            },
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            scorer_timeout_secs: parse_env("SCORER_TIMEOUT_SECS", DEFAULT_SCORER_TIMEOUT_SECS)?,
            interview_sample_size: parse_env(
                "INTERVIEW_SAMPLE_SIZE",
                DEFAULT_INTERVIEW_SAMPLE_SIZE,
            )?,
            practice_sample_size: parse_env("PRACTICE_SAMPLE_SIZE", DEFAULT_PRACTICE_SAMPLE_SIZE)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
