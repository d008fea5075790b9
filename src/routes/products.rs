use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::products::CreateProductRequest,
    error::AppResult,
    extract::JsonBody,
    models::Product,
    response::{MessageResponse, ProductCreated},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addproduct", post(create_product))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
}

#[utoipa::path(
    post,
    path = "/api/addproduct",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product added", body = ProductCreated),
        (status = 400, description = "Missing or invalid field", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductCreated>)> {
    let created = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Every product, in insertion order", body = Vec<Product>),
        (status = 500, description = "Storage failure", body = MessageResponse),
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 400, description = "Malformed product ID", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = product_service::get_product(&state, &id).await?;
    Ok(Json(product))
}
