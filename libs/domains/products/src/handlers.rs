//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::cache::CacheStore;
use crate::error::{ErrorDetail, ErrorResponse, ProductResult};
use crate::models::{
    CreateProductRequest, FindProductsQuery, FindProductsRequest, Pagination, Product,
    UpdateProductRequest,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

type SharedService<R, C> = State<Arc<ProductService<R, C>>>;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(schemas(
        Product,
        CreateProductRequest,
        UpdateProductRequest,
        FindProductsRequest,
        Pagination,
        ErrorResponse,
        ErrorDetail
    )),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R, C>(service: ProductService<R, C>) -> Router
where
    R: ProductRepository + 'static,
    C: CacheStore + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List one page of products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(FindProductsQuery),
    responses(
        (status = 200, description = "Page of products", body = Vec<Product>),
        (status = 400, description = "Invalid search parameters", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, C: CacheStore>(
    State(service): SharedService<R, C>,
    Query(query): Query<FindProductsQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.find_all(query.into()).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, C: CacheStore>(
    State(service): SharedService<R, C>,
    Json(input): Json<CreateProductRequest>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, C: CacheStore>(
    State(service): SharedService<R, C>,
    Path(id): Path<i32>,
) -> ProductResult<Json<Product>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(product))
}

/// Update a product; omitted fields keep their current value
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, C: CacheStore>(
    State(service): SharedService<R, C>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProductRequest>,
) -> ProductResult<Json<Product>> {
    let product = service.update(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store or cache failure", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, C: CacheStore>(
    State(service): SharedService<R, C>,
    Path(id): Path<i32>,
) -> ProductResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
