//! Products Domain
//!
//! Request fulfillment for a product catalog: validation, a cache-aside read
//! path with write-through on mutations, and a safe dynamic list query.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌─────────────┐
//! │   Service   │ ───▶ │    Cache    │  ← ProductCache over a CacheStore (memory / Redis)
//! └──────┬──────┘      └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and PostgreSQL implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, validation, query resolution
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     InMemoryCacheStore, PgProductRepository, ProductCache, ProductService, handlers,
//! };
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://localhost/catalog").await?;
//!
//! let repository = PgProductRepository::new(db);
//! let cache = ProductCache::new(InMemoryCacheStore::new());
//! let service = ProductService::new(repository, cache);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use cache::{CacheStore, InMemoryCacheStore, ProductCache, RedisCacheStore};
pub use error::{ErrorDetail, ErrorResponse, FieldError, ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProductRequest, FindProductsQuery, FindProductsRequest, NewProduct, Pagination,
    Product, UpdateProductRequest,
};
pub use postgres::PgProductRepository;
pub use query::{ProductField, ProductQuery};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
