use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Product entity - represents a catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store on create
    pub id: i32,
    /// Product name (1-100 characters)
    pub name: String,
    /// Product description (1-500 characters)
    pub description: String,
    /// Units in stock
    pub available_quantity: i64,
    /// Unit price, serialized as a decimal string
    pub price: Decimal,
}

/// A product that has not been persisted yet, so it has no id
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub available_quantity: i64,
    pub price: Decimal,
}

/// DTO for creating a new product
///
/// Every field is optional at the type level so that a missing field is
/// reported as a validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available_quantity: Option<i64>,
    /// Accepts a JSON number or a decimal string
    pub price: Option<Decimal>,
}

/// DTO for updating an existing product; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available_quantity: Option<i64>,
    /// Accepts a JSON number or a decimal string
    pub price: Option<Decimal>,
}

/// Page selection for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page_number: i64,
    /// Number of items per page (1-200)
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }
}

/// Search request for listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindProductsRequest {
    /// Full or partial product name, matched case-insensitively
    pub name_to_find: Option<String>,
    /// Product field to sort by (ascending); defaults to `Id`
    pub property_to_order_by: Option<String>,
    pub pagination: Option<Pagination>,
}

/// Query string accepted by the list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindProductsQuery {
    /// The page number to return
    pub page_number: Option<i64>,
    /// The page size to return
    pub page_size: Option<i64>,
    /// The name to find
    pub name_to_find: Option<String>,
    /// The property to order by
    pub property_to_order_by: Option<String>,
}

impl From<FindProductsQuery> for FindProductsRequest {
    /// A missing page parameter is treated as 0 so it fails range validation,
    /// unless both are missing, in which case there is no pagination at all.
    fn from(query: FindProductsQuery) -> Self {
        let pagination = match (query.page_number, query.page_size) {
            (None, None) => None,
            (number, size) => Some(Pagination::new(number.unwrap_or(0), size.unwrap_or(0))),
        };

        Self {
            name_to_find: query.name_to_find,
            property_to_order_by: query.property_to_order_by,
            pagination,
        }
    }
}

impl Product {
    /// Apply a partial update. Fields absent from the request keep their value;
    /// the id is never touched.
    pub fn apply_update(&mut self, update: UpdateProductRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available_quantity) = update.available_quantity {
            self.available_quantity = available_quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 3,
            name: "Keyboard".to_string(),
            description: "Mechanical keyboard".to_string(),
            available_quantity: 12,
            price: Decimal::new(4999, 2),
        }
    }

    #[test]
    fn test_apply_update_with_no_fields_keeps_product() {
        let mut p = product();
        p.apply_update(UpdateProductRequest::default());
        assert_eq!(p, product());
    }

    #[test]
    fn test_apply_update_overwrites_present_fields_only() {
        let mut p = product();
        p.apply_update(UpdateProductRequest {
            price: Some(Decimal::new(3999, 2)),
            available_quantity: Some(0),
            ..Default::default()
        });

        assert_eq!(p.id, 3);
        assert_eq!(p.name, "Keyboard");
        assert_eq!(p.available_quantity, 0);
        assert_eq!(p.price, Decimal::new(3999, 2));
    }

    #[test]
    fn test_query_without_page_params_has_no_pagination() {
        let request = FindProductsRequest::from(FindProductsQuery::default());
        assert!(request.pagination.is_none());
    }

    #[test]
    fn test_query_with_one_page_param_defaults_other_to_zero() {
        let request = FindProductsRequest::from(FindProductsQuery {
            page_number: Some(2),
            ..Default::default()
        });
        assert_eq!(request.pagination, Some(Pagination::new(2, 0)));
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(product()).unwrap();
        assert!(json.get("availableQuantity").is_some());
        assert!(json.get("available_quantity").is_none());
    }
}
