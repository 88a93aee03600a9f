//! Products API routes

use axum::Router;
use core_config::cache::CacheBackend;
use domain_products::{
    CacheStore, InMemoryCacheStore, PgProductRepository, ProductCache, ProductRepository,
    ProductService, RedisCacheStore, handlers,
};
use std::time::Duration;

use crate::state::AppState;

fn with_cache<R, C>(repository: R, store: C, ttl: Duration) -> Router
where
    R: ProductRepository + 'static,
    C: CacheStore + 'static,
{
    let service = ProductService::new(repository, ProductCache::with_ttl(store, ttl));
    handlers::router(service)
}

/// Create products router over the configured cache backend
pub fn router(state: &AppState) -> eyre::Result<Router> {
    let repository = PgProductRepository::new(state.db.clone());
    let ttl = state.config.cache.ttl;

    let router = match (&state.config.cache.backend, &state.redis) {
        (CacheBackend::Memory, _) => with_cache(repository, InMemoryCacheStore::new(), ttl),
        (CacheBackend::Redis { .. }, Some(redis)) => {
            with_cache(repository, RedisCacheStore::new(redis.clone()), ttl)
        }
        (CacheBackend::Redis { .. }, None) => {
            eyre::bail!("Redis cache selected but no Redis connection was opened")
        }
    };

    Ok(router)
}
