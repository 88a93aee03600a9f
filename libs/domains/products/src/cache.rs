//! Product cache port and its backends.
//!
//! [`CacheStore`] is the raw key/value seam; [`ProductCache`] layers product
//! keys, JSON encoding and the entry TTL on top of any store.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::ProductResult;
use crate::models::Product;

/// Default lifetime of a cached product (100 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(100 * 60);

/// Key/value store with per-entry expiry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value; `None` if absent or expired
    async fn get_raw(&self, key: &str) -> ProductResult<Option<String>>;

    /// Store a value, replacing any previous one
    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> ProductResult<()>;

    /// Drop a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> ProductResult<()>;
}

/// Typed view of a [`CacheStore`] holding products by id
pub struct ProductCache<C: CacheStore> {
    store: Arc<C>,
    ttl: Duration,
}

impl<C: CacheStore> ProductCache<C> {
    pub fn new(store: C) -> Self {
        Self::with_ttl(store, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(store: C, ttl: Duration) -> Self {
        Self {
            store: Arc::new(store),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cache key for a product id
    pub fn key(id: i32) -> String {
        format!("Product_{}", id)
    }

    pub async fn get(&self, id: i32) -> ProductResult<Option<Product>> {
        match self.store.get_raw(&Self::key(id)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn set(&self, product: &Product) -> ProductResult<()> {
        let raw = serde_json::to_string(product)?;
        self.store
            .set_raw(&Self::key(product.id), raw, self.ttl)
            .await
    }

    pub async fn remove(&self, id: i32) -> ProductResult<()> {
        self.store.remove(&Self::key(id)).await
    }
}

impl<C: CacheStore> Clone for ProductCache<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ttl: self.ttl,
        }
    }
}

/// Process-local cache. Expired entries are dropped when next read.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get_raw(&self, key: &str) -> ProductResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > Instant::now() => {
                    return Ok(Some(value.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|(_, expires_at)| *expires_at <= Instant::now())
        {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> ProductResult<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn remove(&self, key: &str) -> ProductResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Redis-backed cache shared across instances
#[derive(Clone)]
pub struct RedisCacheStore {
    redis: ConnectionManager,
}

impl RedisCacheStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get_raw(&self, key: &str) -> ProductResult<Option<String>> {
        let mut conn = self.redis.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> ProductResult<()> {
        let mut conn = self.redis.clone();
        // SET EX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> ProductResult<()> {
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
