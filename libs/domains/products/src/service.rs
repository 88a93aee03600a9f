//! Product Service - request fulfillment layer
//!
//! Every operation validates first, then talks to the store, then brings the
//! cache in line:
//!
//! | Operation | Store                    | Cache                       |
//! |-----------|--------------------------|-----------------------------|
//! | create    | create                   | set after success           |
//! | update    | get_by_id, then update   | set after success           |
//! | delete    | get_by_id, then delete   | remove after success        |
//! | get_by_id | get_by_id on a miss only | get first, set on a miss    |
//! | find_all  | scan                     | never touched               |
//!
//! Existence checks for update and delete always go to the store, so a stale
//! cache entry can never resurrect a deleted product.

use std::sync::Arc;
use tracing::instrument;

use crate::cache::{CacheStore, ProductCache};
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProductRequest, FindProductsRequest, Product, UpdateProductRequest};
use crate::repository::ProductRepository;
use crate::validation;

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository, C: CacheStore> {
    repository: Arc<R>,
    cache: ProductCache<C>,
}

/// Log store and cache failures at the service boundary; caller mistakes pass through quietly.
fn log_failure<T>(result: ProductResult<T>, action: &str) -> ProductResult<T> {
    if let Err(err @ (ProductError::Database(_) | ProductError::Cache(_))) = &result {
        tracing::error!(error = %err, "Error {}", action);
    }
    result
}

impl<R: ProductRepository, C: CacheStore> ProductService<R, C> {
    /// Create a new ProductService over a repository and a product cache
    pub fn new(repository: R, cache: ProductCache<C>) -> Self {
        Self {
            repository: Arc::new(repository),
            cache,
        }
    }

    /// Create a new product, then cache it under its assigned id
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateProductRequest) -> ProductResult<Product> {
        let new_product = validation::new_product(&input)?;

        let result: ProductResult<Product> = async {
            let product = self.repository.create(new_product).await?;
            self.cache.set(&product).await?;
            Ok(product)
        }
        .await;

        log_failure(result, "creating product")
    }

    /// Apply a partial update to an existing product and write it through to the cache
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateProductRequest) -> ProductResult<Product> {
        validation::check_update(&input)?;

        let result: ProductResult<Product> = async {
            let mut product = self
                .repository
                .get_by_id(id)
                .await?
                .ok_or(ProductError::NotFound(id))?;

            product.apply_update(input);

            let updated = self.repository.update(product).await?;
            self.cache.set(&updated).await?;
            Ok(updated)
        }
        .await;

        log_failure(result, "updating product")
    }

    /// Delete a product and evict it from the cache
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ProductResult<()> {
        let result: ProductResult<()> = async {
            if self.repository.get_by_id(id).await?.is_none() {
                return Err(ProductError::NotFound(id));
            }

            self.repository.delete(id).await?;
            self.cache.remove(id).await
        }
        .await;

        log_failure(result, "deleting product")
    }

    /// Get a product by ID, serving from the cache when possible
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> ProductResult<Product> {
        let result: ProductResult<Product> = async {
            if let Some(cached) = self.cache.get(id).await? {
                tracing::debug!(product_id = id, "Cache hit");
                return Ok(cached);
            }

            let product = self
                .repository
                .get_by_id(id)
                .await?
                .ok_or(ProductError::NotFound(id))?;

            self.cache.set(&product).await?;
            Ok(product)
        }
        .await;

        log_failure(result, "getting product")
    }

    /// List one page of products, optionally filtered by name
    #[instrument(skip(self, input))]
    pub async fn find_all(&self, input: FindProductsRequest) -> ProductResult<Vec<Product>> {
        let query = validation::product_query(&input)?;

        log_failure(self.repository.scan(query).await, "finding products")
    }
}

impl<R: ProductRepository, C: CacheStore> Clone for ProductService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: self.cache.clone(),
        }
    }
}
