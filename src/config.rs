//! Runtime settings from environment variables. The server binary loads `.env` first.

use crate::auth::StaticTokens;
use crate::error::ConfigError;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// When unset every record type is kept in memory.
    pub database_url: Option<String>,
    pub database_schema: String,
    pub max_connections: u32,
    pub api_tokens: StaticTokens,
    pub request_body_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Ok(Settings {
            bind_addr: parse_or("BIND_ADDR", var("BIND_ADDR"), DEFAULT_BIND_ADDR)?,
            database_url: var("DATABASE_URL"),
            database_schema: var("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                var("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            api_tokens: match var("API_TOKENS") {
                Some(spec) => StaticTokens::parse(&spec)?,
                None => {
                    tracing::warn!("API_TOKENS not set; every request will be unauthenticated");
                    StaticTokens::new()
                }
            },
            request_body_limit: parse_or("REQUEST_BODY_LIMIT", var("REQUEST_BODY_LIMIT"), DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn parse_or<T, D>(key: &'static str, value: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    D: ToString,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: format!("'{}': {}", raw, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory_on_localhost() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert!(s.database_url.is_none());
        assert_eq!(s.database_schema, "public");
        assert_eq!(s.max_connections, 5);
        assert!(s.api_tokens.is_empty());
        assert_eq!(s.request_body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("BIND_ADDR", "0.0.0.0:3000"),
            ("DATABASE_URL", "postgres://localhost/campus"),
            ("DATABASE_SCHEMA", "crud"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("API_TOKENS", "t1=admin@ucsb.edu:ADMIN"),
        ])
        .unwrap();
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.database_url.as_deref(), Some("postgres://localhost/campus"));
        assert_eq!(s.database_schema, "crud");
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.api_tokens.len(), 1);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let s = settings(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(s.database_url.is_none());
    }

    #[test]
    fn malformed_values_are_config_errors() {
        let err = settings(&[("DATABASE_MAX_CONNECTIONS", "lots")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid DATABASE_MAX_CONNECTIONS"));
        assert!(settings(&[("API_TOKENS", "broken")]).is_err());
    }
}
