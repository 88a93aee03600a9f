//! Connection helpers for the catalog's backing stores
//!
//! - `postgres` (default): pooled SeaORM connection built from
//!   [`core_config::database::DatabaseConfig`], migrations and a health ping.
//! - `redis` (default): a reconnecting `ConnectionManager` plus a PING check.
//!
//! Both connectors retry startup failures with exponential backoff
//! (see [`retry`]).
//!
//! ```ignore
//! use core_config::{FromEnv, database::DatabaseConfig};
//! use database::{RetryPolicy, postgres};
//!
//! let config = DatabaseConfig::from_env()?;
//! let db = postgres::connect_with_retry(&config, RetryPolicy::default()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db).await?;
//! ```

pub mod error;
pub mod retry;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryPolicy, retry_with_backoff};
