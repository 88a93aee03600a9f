use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// All violations reported against a single input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reasons: Vec<String>,
}

impl FieldError {
    pub fn message(&self) -> String {
        format!("Invalid field: {}", self.field)
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Product not found")]
    NotFound(i32),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Cache(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// One entry of a failed result: a message plus the reasons behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    pub reasons: Vec<String>,
}

impl ProductError {
    /// Flatten the error into the `{message, reasons}` list handed to callers.
    pub fn details(&self) -> Vec<ErrorDetail> {
        match self {
            ProductError::Validation(fields) => fields
                .iter()
                .map(|f| ErrorDetail {
                    message: f.message(),
                    reasons: f.reasons.clone(),
                })
                .collect(),
            other => vec![ErrorDetail {
                message: other.to_string(),
                reasons: Vec::new(),
            }],
        }
    }

    /// Reasons reported for `field`, if the error is a validation failure naming it.
    pub fn field_reasons(&self, field: &str) -> Option<&[String]> {
        match self {
            ProductError::Validation(fields) => fields
                .iter()
                .find(|f| f.field == field)
                .map(|f| f.reasons.as_slice()),
            _ => None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ProductError::Validation(_) => StatusCode::BAD_REQUEST,
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::Database(_) | ProductError::Cache(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ProductError {
    /// Group violations per field. Fields named in `rule_order` come first, in
    /// that order; any others follow by name. Reasons keep the order the rules
    /// were checked in.
    pub fn from_violations(errors: ValidationErrors, rule_order: &[&str]) -> Self {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, violations) in errors.field_errors() {
            let reasons = grouped.entry(field.to_string()).or_default();
            reasons.extend(violations.iter().map(|v| {
                v.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| v.code.to_string())
            }));
        }

        let mut fields = Vec::with_capacity(grouped.len());
        for name in rule_order {
            if let Some((field, reasons)) = grouped.remove_entry(*name) {
                fields.push(FieldError { field, reasons });
            }
        }
        fields.extend(
            grouped
                .into_iter()
                .map(|(field, reasons)| FieldError { field, reasons }),
        );

        ProductError::Validation(fields)
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        ProductError::from_violations(errors, &[])
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for ProductError {
    fn from(err: redis::RedisError) -> Self {
        ProductError::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for ProductError {
    fn from(err: serde_json::Error) -> Self {
        ProductError::Cache(format!("Failed to (de)serialize cached product: {}", err))
    }
}

/// Error body returned by the HTTP layer
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: String,
    pub errors: Vec<ErrorDetail>,
}

impl From<&ProductError> for ErrorResponse {
    fn from(err: &ProductError) -> Self {
        let status = err.status();
        Self {
            status: status.as_u16(),
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            errors: err.details(),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from(&self);
        (self.status(), Json(body)).into_response()
    }
}
