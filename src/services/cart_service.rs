use chrono::Utc;

use crate::{
    dto::cart::AddToCartRequest,
    error::{AppError, AppResult},
    models::{Cart, CartItem, CartMerge, RefId},
    state::AppState,
    validation,
};

pub async fn add_to_cart(state: &AppState, payload: AddToCartRequest) -> AppResult<CartMerge> {
    let user_id = validation::required(payload.user_id)?;
    let product_id = validation::required(payload.product_id)?;
    let quantity = match payload.quantity {
        Some(value) => validation::positive_integer(&value)
            .ok_or_else(|| AppError::bad_request("quantity must be a positive integer"))?,
        None => 1,
    };
    let price = payload
        .price
        .map(|value| {
            value
                .as_f64()
                .filter(|price| price.is_finite())
                .ok_or_else(|| AppError::bad_request("Price must be a number"))
        })
        .transpose()?;
    let images = payload
        .images
        .map(|value| {
            validation::string_list(&value)
                .ok_or_else(|| AppError::bad_request("Images must be an array of strings"))
        })
        .transpose()?;
    let user_id = validation::ref_id(&user_id, "userId")?;
    let product_id = validation::ref_id(&product_id, "productId")?;

    let item = CartItem {
        product_id,
        quantity,
        name: payload.name,
        price,
        category: payload.category,
        images,
        added_at: Utc::now(),
    };
    let merge = state.carts.merge_cart_item(user_id, item).await?;

    match merge {
        CartMerge::Created(cart_id) => {
            tracing::info!(%cart_id, %user_id, %product_id, quantity, "cart created")
        }
        CartMerge::Updated(cart_id) => {
            tracing::debug!(%cart_id, %user_id, %product_id, quantity, "cart updated")
        }
    }

    Ok(merge)
}

pub async fn get_cart(state: &AppState, user_id: &str) -> AppResult<Cart> {
    let user_id = RefId::parse(user_id).ok_or_else(|| AppError::bad_request("Invalid userId"))?;
    match state.carts.find_cart(user_id).await? {
        Some(cart) => Ok(cart),
        None => Err(AppError::not_found("Cart not found")),
    }
}
