//! Service settings from the process environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/entity_store";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// Schema holding the tables. `None` uses the connection's default `search_path`.
    pub database_schema: Option<String>,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let database_schema = match get("DATABASE_SCHEMA") {
            Some(schema) if is_identifier(&schema) => Some(schema),
            Some(schema) => {
                return Err(ConfigError::Invalid {
                    key: "DATABASE_SCHEMA",
                    value: schema,
                })
            }
            None => None,
        };
        let max_connections = parse_or(get("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: v })?,
            None => DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.into(),
            })?,
        };
        let body_limit_bytes = parse_or(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

        Ok(Settings {
            database_url,
            database_schema,
            max_connections,
            bind_addr,
            body_limit_bytes,
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

/// Plain lowercase PostgreSQL identifier, safe to splice into DDL unquoted.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
