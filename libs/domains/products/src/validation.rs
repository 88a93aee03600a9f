//! Field-level rules for the product request DTOs.
//!
//! Each request implements [`validator::Validate`]; violations are keyed by the
//! field name callers see (`Name`, `Pagination.PageSize`, ...) and carry one
//! message per broken rule.
//!
//! The service goes through [`new_product`], [`check_update`] and
//! [`product_query`], which hand back the typed value a passing request
//! describes and report failing fields in the order their rules run.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProductRequest, FindProductsRequest, NewProduct, UpdateProductRequest,
};
use crate::query::{ProductField, ProductQuery};

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const NAME_TO_FIND_MAX_LEN: usize = 100;
pub const PAGE_SIZE_MAX: i64 = 200;

/// Product fields in the order their rules are checked
pub const PRODUCT_RULE_ORDER: &[&str] = &["Name", "Description", "AvailableQuantity", "Price"];

/// Search fields in the order their rules are checked
pub const FIND_RULE_ORDER: &[&str] = &[
    "NameToFind",
    "PropertyToOrderBy",
    "Pagination",
    "Pagination.PageNumber",
    "Pagination.PageSize",
];

fn violation(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn required(errors: &mut ValidationErrors, field: &'static str) {
    errors.add(field, violation("required", format!("{} is required", field)));
}

fn check_text(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.trim().is_empty() {
        required(errors, field);
    }
    if value.chars().count() > max {
        errors.add(
            field,
            violation(
                "length",
                format!("{} must be less than or equal to {} characters", field, max),
            ),
        );
    }
}

fn check_max_len(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            violation(
                "length",
                format!("{} must be less than or equal to {} characters", field, max),
            ),
        );
    }
}

fn check_non_negative<T: PartialOrd + Default>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: T,
) {
    if value < T::default() {
        errors.add(
            field,
            violation("range", format!("{} must be greater than or equal to 0", field)),
        );
    }
}

fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn checked_create(input: &CreateProductRequest) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = match &input.name {
        Some(name) => {
            check_text(&mut errors, "Name", name, NAME_MAX_LEN);
            Some(name)
        }
        None => {
            required(&mut errors, "Name");
            None
        }
    };
    let description = match &input.description {
        Some(description) => {
            check_text(&mut errors, "Description", description, DESCRIPTION_MAX_LEN);
            Some(description)
        }
        None => {
            required(&mut errors, "Description");
            None
        }
    };
    let available_quantity = match input.available_quantity {
        Some(quantity) => {
            check_non_negative(&mut errors, "AvailableQuantity", quantity);
            Some(quantity)
        }
        None => {
            required(&mut errors, "AvailableQuantity");
            None
        }
    };
    let price = match input.price {
        Some(price) => {
            check_non_negative::<Decimal>(&mut errors, "Price", price);
            Some(price)
        }
        None => {
            required(&mut errors, "Price");
            None
        }
    };

    // a missing field always leaves a violation behind
    match (name, description, available_quantity, price) {
        (Some(name), Some(description), Some(available_quantity), Some(price))
            if errors.is_empty() =>
        {
            Ok(NewProduct {
                name: name.clone(),
                description: description.clone(),
                available_quantity,
                price,
            })
        }
        _ => Err(errors),
    }
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        checked_create(self).map(|_| ())
    }
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = &self.name {
            check_max_len(&mut errors, "Name", name, NAME_MAX_LEN);
        }
        if let Some(description) = &self.description {
            check_max_len(&mut errors, "Description", description, DESCRIPTION_MAX_LEN);
        }
        if let Some(quantity) = self.available_quantity {
            check_non_negative(&mut errors, "AvailableQuantity", quantity);
        }
        if let Some(price) = self.price {
            check_non_negative::<Decimal>(&mut errors, "Price", price);
        }

        into_result(errors)
    }
}

fn checked_find(input: &FindProductsRequest) -> Result<ProductQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(name) = &input.name_to_find {
        check_max_len(&mut errors, "NameToFind", name, NAME_TO_FIND_MAX_LEN);
    }

    let order_by = match input.property_to_order_by.as_deref() {
        None => Some(ProductField::default()),
        Some(field) => {
            let resolved = ProductField::resolve(field);
            if resolved.is_none() {
                errors.add(
                    "PropertyToOrderBy",
                    violation(
                        "unknown_field",
                        format!(
                            "PropertyToOrderBy must be one of: {}",
                            ProductField::names().join(", ")
                        ),
                    ),
                );
            }
            resolved
        }
    };

    if let Some(pagination) = input.pagination {
        if pagination.page_number < 1 {
            errors.add(
                "Pagination.PageNumber",
                violation(
                    "range",
                    "PageNumber must be greater than or equal to 1".to_string(),
                ),
            );
        }
        if pagination.page_size < 1 {
            errors.add(
                "Pagination.PageSize",
                violation(
                    "range",
                    "PageSize must be greater than or equal to 1".to_string(),
                ),
            );
        }
        if pagination.page_size > PAGE_SIZE_MAX {
            errors.add(
                "Pagination.PageSize",
                violation(
                    "range",
                    format!("PageSize must be less than or equal to {}", PAGE_SIZE_MAX),
                ),
            );
        }
    } else {
        required(&mut errors, "Pagination");
    }

    match (order_by, input.pagination) {
        (Some(order_by), Some(pagination)) if errors.is_empty() => Ok(ProductQuery::new(
            input.name_to_find.as_deref(),
            order_by,
            pagination,
        )),
        _ => Err(errors),
    }
}

impl Validate for FindProductsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        checked_find(self).map(|_| ())
    }
}

/// Validate a create request and hand back the product it describes.
pub fn new_product(input: &CreateProductRequest) -> ProductResult<NewProduct> {
    checked_create(input).map_err(|e| ProductError::from_violations(e, PRODUCT_RULE_ORDER))
}

pub fn check_update(input: &UpdateProductRequest) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::from_violations(e, PRODUCT_RULE_ORDER))
}

/// Validate a search and resolve it into the scan the store runs.
pub fn product_query(input: &FindProductsRequest) -> ProductResult<ProductQuery> {
    checked_find(input).map_err(|e| ProductError::from_violations(e, FIND_RULE_ORDER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;

    fn valid_create() -> CreateProductRequest {
        CreateProductRequest {
            name: Some("Desk lamp".to_string()),
            description: Some("LED desk lamp".to_string()),
            available_quantity: Some(4),
            price: Some(Decimal::new(2550, 2)),
        }
    }

    fn errors_of<T: Validate>(input: &T) -> ProductError {
        ProductError::from(input.validate().expect_err("expected violations"))
    }

    #[test]
    fn test_valid_create_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_boundary_lengths() {
        let mut input = valid_create();
        input.name = Some("a".repeat(100));
        input.description = Some("d".repeat(500));
        assert!(input.validate().is_ok());

        input.name = Some("a".repeat(101));
        let err = errors_of(&input);
        assert_eq!(
            err.field_reasons("Name").unwrap(),
            ["Name must be less than or equal to 100 characters"]
        );
        assert!(err.field_reasons("Description").is_none());
    }

    #[test]
    fn test_create_missing_fields_are_required() {
        let err = errors_of(&CreateProductRequest::default());
        for field in ["Name", "Description", "AvailableQuantity", "Price"] {
            let reasons = err.field_reasons(field).unwrap();
            assert_eq!(reasons, [format!("{} is required", field)]);
        }
    }

    #[test]
    fn test_create_rejects_blank_and_negative() {
        let mut input = valid_create();
        input.name = Some("   ".to_string());
        input.available_quantity = Some(-1);
        input.price = Some(Decimal::new(-1, 2));

        let err = errors_of(&input);
        assert_eq!(err.field_reasons("Name").unwrap(), ["Name is required"]);
        assert_eq!(
            err.field_reasons("AvailableQuantity").unwrap(),
            ["AvailableQuantity must be greater than or equal to 0"]
        );
        assert!(err.field_reasons("Price").is_some());
    }

    #[test]
    fn test_create_zero_quantity_and_price_are_valid() {
        let mut input = valid_create();
        input.available_quantity = Some(0);
        input.price = Some(Decimal::ZERO);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateProductRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_checks_present_fields() {
        let input = UpdateProductRequest {
            description: Some("x".repeat(501)),
            price: Some(Decimal::new(-5, 0)),
            ..Default::default()
        };
        let err = errors_of(&input);
        assert!(err.field_reasons("Description").is_some());
        assert!(err.field_reasons("Price").is_some());
        assert!(err.field_reasons("Name").is_none());
    }

    #[test]
    fn test_find_unknown_order_field_lists_valid_names() {
        let input = FindProductsRequest {
            property_to_order_by: Some("InvalidProperty".to_string()),
            pagination: Some(Pagination::new(1, 10)),
            ..Default::default()
        };
        let err = errors_of(&input);
        let reasons = err.field_reasons("PropertyToOrderBy").unwrap();
        assert_eq!(
            reasons,
            ["PropertyToOrderBy must be one of: Id, Name, Description, AvailableQuantity, Price"]
        );
    }

    #[test]
    fn test_find_order_field_is_case_sensitive() {
        let input = FindProductsRequest {
            property_to_order_by: Some("name".to_string()),
            pagination: Some(Pagination::new(1, 10)),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_find_requires_pagination() {
        let err = errors_of(&FindProductsRequest::default());
        assert_eq!(err.field_reasons("Pagination").unwrap(), ["Pagination is required"]);
    }

    #[test]
    fn test_find_page_bounds() {
        let mut input = FindProductsRequest {
            pagination: Some(Pagination::new(1, 200)),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.pagination = Some(Pagination::new(0, 201));
        let err = errors_of(&input);
        assert_eq!(
            err.field_reasons("Pagination.PageNumber").unwrap(),
            ["PageNumber must be greater than or equal to 1"]
        );
        assert_eq!(
            err.field_reasons("Pagination.PageSize").unwrap(),
            ["PageSize must be less than or equal to 200"]
        );

        input.pagination = Some(Pagination::new(1, 0));
        let err = errors_of(&input);
        assert_eq!(
            err.field_reasons("Pagination.PageSize").unwrap(),
            ["PageSize must be greater than or equal to 1"]
        );
    }

    #[test]
    fn test_find_name_to_find_length() {
        let input = FindProductsRequest {
            name_to_find: Some("n".repeat(101)),
            pagination: Some(Pagination::new(1, 10)),
            ..Default::default()
        };
        assert!(errors_of(&input).field_reasons("NameToFind").is_some());
    }

    #[test]
    fn test_new_product_carries_request_values() {
        let product = new_product(&valid_create()).unwrap();
        assert_eq!(product.name, "Desk lamp");
        assert_eq!(product.available_quantity, 4);
        assert_eq!(product.price, Decimal::new(2550, 2));
    }

    #[test]
    fn test_new_product_reports_fields_in_rule_order() {
        let input = CreateProductRequest {
            name: Some("x".repeat(101)),
            description: Some("ok".to_string()),
            available_quantity: Some(-1),
            price: None,
        };
        let messages: Vec<String> = new_product(&input)
            .unwrap_err()
            .details()
            .into_iter()
            .map(|d| d.message)
            .collect();

        assert_eq!(
            messages,
            [
                "Invalid field: Name",
                "Invalid field: AvailableQuantity",
                "Invalid field: Price"
            ]
        );
    }

    #[test]
    fn test_product_query_reports_fields_in_rule_order() {
        let input = FindProductsRequest {
            property_to_order_by: Some("InvalidProperty".to_string()),
            ..Default::default()
        };
        let messages: Vec<String> = product_query(&input)
            .unwrap_err()
            .details()
            .into_iter()
            .map(|d| d.message)
            .collect();

        assert_eq!(
            messages,
            ["Invalid field: PropertyToOrderBy", "Invalid field: Pagination"]
        );
    }

    #[test]
    fn test_product_query_resolves_order_and_page() {
        let query = product_query(&FindProductsRequest {
            name_to_find: Some("lamp".to_string()),
            pagination: Some(Pagination::new(3, 25)),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(query.order_by, ProductField::Id);
        assert_eq!(query.name_contains.as_deref(), Some("lamp"));
        assert_eq!((query.offset, query.limit), (50, 25));
    }
}
