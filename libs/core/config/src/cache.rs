use crate::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use std::time::Duration;

/// Where cached products live
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    /// Process-local map; entries are lost on restart and not shared
    Memory,
    /// Shared Redis instance
    Redis { url: String },
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            ttl: Duration::from_secs(100 * 60),
        }
    }
}

impl FromEnv for CacheConfig {
    /// - CACHE_BACKEND: `memory` (default) or `redis`
    /// - REDIS_URL: required for the redis backend
    /// - CACHE_TTL_MINUTES: defaults to 100
    fn from_env() -> Result<Self, ConfigError> {
        let backend = match env_or_default("CACHE_BACKEND", "memory")
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => CacheBackend::Memory,
            "redis" => CacheBackend::Redis {
                url: env_required("REDIS_URL")?,
            },
            other => {
                return Err(ConfigError::ParseError {
                    key: "CACHE_BACKEND".to_string(),
                    details: format!("unknown backend '{}', expected memory or redis", other),
                });
            }
        };

        let minutes = env_parse("CACHE_TTL_MINUTES", 100u64)?;
        if minutes == 0 {
            return Err(ConfigError::ParseError {
                key: "CACHE_TTL_MINUTES".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let seconds = minutes
            .checked_mul(60)
            .ok_or_else(|| ConfigError::ParseError {
                key: "CACHE_TTL_MINUTES".to_string(),
                details: format!("{} minutes is out of range", minutes),
            })?;

        Ok(Self {
            backend,
            ttl: Duration::from_secs(seconds),
        })
    }
}
