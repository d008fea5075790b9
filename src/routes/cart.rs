use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::cart::AddToCartRequest,
    error::AppResult,
    extract::JsonBody,
    models::{Cart, CartMerge},
    response::{CartAdded, MessageResponse},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addincart", post(add_to_cart))
        .route("/carts/{user_id}", get(get_cart))
}

#[utoipa::path(
    post,
    path = "/api/addincart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "New cart created for the user", body = CartAdded),
        (status = 200, description = "Existing cart updated", body = CartAdded),
        (status = 400, description = "Missing or invalid field", body = MessageResponse),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<CartAdded>)> {
    let response = match cart_service::add_to_cart(&state, payload).await? {
        CartMerge::Created(cart_id) => (
            StatusCode::CREATED,
            Json(CartAdded {
                message: "Product added to new cart successfully".to_string(),
                cart_id: Some(cart_id),
            }),
        ),
        CartMerge::Updated(_) => (
            StatusCode::OK,
            Json(CartAdded {
                message: "Cart updated successfully".to_string(),
                cart_id: None,
            }),
        ),
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/carts/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the cart (24 hex characters)")
    ),
    responses(
        (status = 200, description = "The user's cart", body = Cart),
        (status = 400, description = "Malformed user ID", body = MessageResponse),
        (status = 404, description = "User has no cart", body = MessageResponse),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Cart>> {
    let cart = cart_service::get_cart(&state, &user_id).await?;
    Ok(Json(cart))
}
