use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};
use crate::query::{ProductField, ProductQuery};

/// Repository trait for Product persistence
///
/// Implementations own id assignment and make every write durable before
/// returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return it with its assigned id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Overwrite a stored product; fails with `NotFound` if the id is unknown
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID; fails with `NotFound` if the id is unknown
    async fn delete(&self, id: i32) -> ProductResult<()>;

    /// Filter, sort and page products
    async fn scan(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;
}

/// Compare two products on `field` ascending, falling back to id.
pub fn compare_by(field: ProductField, a: &Product, b: &Product) -> Ordering {
    let primary = match field {
        ProductField::Id => Ordering::Equal,
        ProductField::Name => a.name.cmp(&b.name),
        ProductField::Description => a.description.cmp(&b.description),
        ProductField::AvailableQuantity => a.available_quantity.cmp(&b.available_quantity),
        ProductField::Price => a.price.cmp(&b.price),
    };
    primary.then(a.id.cmp(&b.id))
}

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// Process-local product store
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Database("Product id space exhausted".to_string()))?;
        table.last_id = id;

        let product = Product {
            id,
            name: input.name,
            description: input.description,
            available_quantity: input.available_quantity,
            price: input.price,
        };
        table.rows.insert(id, product.clone());

        tracing::debug!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut table = self.table.write().await;
        let slot = table
            .rows
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(ProductError::NotFound(id))
    }

    async fn scan(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let table = self.table.read().await;
        let needle = query.name_contains.as_ref().map(|n| n.to_lowercase());

        let mut matches: Vec<&Product> = table
            .rows
            .values()
            .filter(|p| match &needle {
                Some(needle) => p.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect();
        matches.sort_by(|a, b| compare_by(query.order_by, a, b));

        let skip = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(matches.into_iter().skip(skip).take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_product(name: &str, quantity: i64, price: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            available_quantity: quantity,
            price: Decimal::new(price, 2),
        }
    }

    fn query(name: Option<&str>, order_by: ProductField, offset: u64, limit: u64) -> ProductQuery {
        ProductQuery {
            name_contains: name.map(str::to_string),
            order_by,
            offset,
            limit,
        }
    }

    async fn seeded() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for (name, quantity, price) in [
            ("Widget", 5, 1000),
            ("Gadget", 5, 500),
            ("widget pro", 1, 2500),
            ("Sprocket", 9, 500),
        ] {
            repo.create(new_product(name, quantity, price)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(new_product("A", 1, 100)).await.unwrap();
        let b = repo.create(new_product("B", 1, 100)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.get_by_id(2).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_fail() {
        let repo = InMemoryProductRepository::new();
        let mut p = repo.create(new_product("A", 1, 100)).await.unwrap();
        p.id = 99;

        assert!(matches!(repo.update(p).await, Err(ProductError::NotFound(99))));
        assert!(matches!(repo.delete(99).await, Err(ProductError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = seeded().await;
        repo.delete(1).await.unwrap();
        assert_eq!(repo.get_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_scan_filters_case_insensitively() {
        let repo = seeded().await;
        let found = repo
            .scan(query(Some("WIDGET"), ProductField::Id, 0, 10))
            .await
            .unwrap();
        let ids: Vec<i32> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_scan_orders_with_id_tie_break() {
        let repo = seeded().await;
        let found = repo
            .scan(query(None, ProductField::Price, 0, 10))
            .await
            .unwrap();
        let ids: Vec<i32> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);

        let found = repo
            .scan(query(None, ProductField::AvailableQuantity, 0, 10))
            .await
            .unwrap();
        let ids: Vec<i32> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[tokio::test]
    async fn test_scan_pages() {
        let repo = seeded().await;
        let page = repo
            .scan(query(None, ProductField::Id, 2, 2))
            .await
            .unwrap();
        assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 4]);

        let past_end = repo
            .scan(query(None, ProductField::Id, 10, 2))
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }
}
