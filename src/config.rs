//! Runtime settings from the environment, with `.env` support via dotenvy.

use crate::auth::{AllowAll, ApiKeyAuthorizer, Authorizer};
use crate::error::ConfigError;
use std::sync::Arc;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://gravity.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    /// `GRAVITY_DATABASE_URL`
    pub database_url: String,
    /// `GRAVITY_BIND`
    pub bind: String,
    /// `GRAVITY_API_KEY`. Unset or empty disables authorization.
    pub api_key: Option<String>,
    /// `GRAVITY_MAX_BODY_BYTES`
    pub max_body_bytes: usize,
    /// `GRAVITY_MAX_CONNECTIONS`
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind: DEFAULT_BIND.into(),
            api_key: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read `GRAVITY_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Ok(Settings {
            database_url: lookup("GRAVITY_DATABASE_URL").unwrap_or(defaults.database_url),
            bind: lookup("GRAVITY_BIND").unwrap_or(defaults.bind),
            api_key: lookup("GRAVITY_API_KEY").filter(|k| !k.trim().is_empty()),
            max_body_bytes: parse_or(&lookup, "GRAVITY_MAX_BODY_BYTES", defaults.max_body_bytes)?,
            max_connections: parse_or(&lookup, "GRAVITY_MAX_CONNECTIONS", defaults.max_connections)?,
        })
    }

    pub fn authorizer(&self) -> Arc<dyn Authorizer> {
        match &self.api_key {
            Some(key) => Arc::new(ApiKeyAuthorizer::new(key.clone())),
            None => Arc::new(AllowAll),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
