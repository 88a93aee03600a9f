use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product},
    query::{ProductField, ProductQuery, contains_pattern},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(field: ProductField) -> entity::Column {
    match field {
        ProductField::Id => entity::Column::Id,
        ProductField::Name => entity::Column::Name,
        ProductField::Description => entity::Column::Description,
        ProductField::AvailableQuantity => entity::Column::AvailableQuantity,
        ProductField::Price => entity::Column::Price,
    }
}

/// SELECT for a resolved scan: name filter, sort with id tie-break, then page.
pub(crate) fn select_for(query: &ProductQuery) -> Select<entity::Entity> {
    let mut select = entity::Entity::find();

    if let Some(needle) = &query.name_contains {
        let name = Expr::expr(Func::lower(Expr::col((
            entity::Entity,
            entity::Column::Name,
        ))));
        select = select.filter(name.like(contains_pattern(&needle.to_lowercase())));
    }

    select = select.order_by_asc(column(query.order_by));
    if query.order_by != ProductField::Id {
        select = select.order_by_asc(entity::Column::Id);
    }

    select.offset(query.offset).limit(query.limit)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = id, "Deleted product");
        Ok(())
    }

    async fn scan(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let models = select_for(&query).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait};

    fn model(id: i32, name: &str) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            description: "Office chair".to_string(),
            available_quantity: 8,
            price: Decimal::new(12900, 2),
        }
    }

    fn sql(query: &ProductQuery) -> String {
        select_for(query).build(DatabaseBackend::Postgres).to_string()
    }

    #[test]
    fn test_select_orders_by_field_then_id() {
        let sql = sql(&ProductQuery {
            name_contains: None,
            order_by: ProductField::Price,
            offset: 20,
            limit: 10,
        });

        assert!(sql.contains(r#"ORDER BY "products"."price" ASC, "products"."id" ASC"#));
        assert!(sql.contains("LIMIT 10"));
        assert!(sql.contains("OFFSET 20"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_select_filters_on_lowercased_name() {
        let sql = sql(&ProductQuery {
            name_contains: Some("Chair".to_string()),
            order_by: ProductField::Id,
            offset: 0,
            limit: 5,
        });

        assert!(sql.contains(r#"LOWER("products"."name") LIKE '%chair%'"#));
        assert!(sql.contains(r#"ORDER BY "products"."id" ASC LIMIT"#));
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Chair")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let created = repo
            .create(NewProduct {
                name: "Chair".to_string(),
                description: "Office chair".to_string(),
                available_quantity: 8,
                price: Decimal::new(12900, 2),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.price, Decimal::new(12900, 2));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(repo.get_by_id(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.update(model(4, "Desk").into()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(4)));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db);

        repo.delete(1).await.unwrap();
        assert!(matches!(repo.delete(1).await, Err(ProductError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_scan_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(2, "Chair"), model(5, "Armchair")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let found = repo
            .scan(ProductQuery {
                name_contains: Some("chair".to_string()),
                order_by: ProductField::Name,
                offset: 0,
                limit: 10,
            })
            .await
            .unwrap();

        assert_eq!(found.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 5]);
    }
}
