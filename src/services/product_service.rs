use chrono::Utc;

use crate::{
    dto::products::CreateProductRequest,
    error::{AppError, AppResult},
    models::{Product, RefId, RentalPrice},
    response::ProductCreated,
    state::AppState,
    store::PRODUCTS_COLLECTION,
    validation::{self, MISSING_FIELDS},
};

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ProductCreated> {
    let name = validation::required(payload.name)?;
    let description = validation::required(payload.description)?;
    let location = validation::required(payload.location)?;
    let category = validation::required(payload.category)?;
    let owner_id = validation::required(payload.owner_id)?;
    let renttype = validation::required(payload.renttype)?;
    let price = payload
        .price
        .ok_or_else(|| AppError::bad_request(MISSING_FIELDS))?;

    let rent_type = validation::rent_type(&renttype)?;
    let price = validation::positive_number(&price)
        .ok_or_else(|| AppError::bad_request("Price must be a positive number"))?;
    let images = match payload.images {
        None => Vec::new(),
        Some(images) => validation::string_list(&images)
            .ok_or_else(|| AppError::bad_request("Images must be an array of strings"))?,
    };
    let owner_id = validation::ref_id(&owner_id, "ownerId")?;

    let now = Utc::now();
    let product = Product {
        id: RefId::new(),
        name,
        description,
        location,
        category,
        price: RentalPrice::new(rent_type, price),
        images,
        owner_id,
        created_at: now,
        updated_at: now,
    };
    state.products.insert_product(&product).await?;

    tracing::info!(
        product_id = %product.id,
        owner_id = %product.owner_id,
        price_field = rent_type.price_field(),
        "product created"
    );

    Ok(ProductCreated {
        message: "Product added successfully".to_string(),
        product_id: product.id,
        collection_name: PRODUCTS_COLLECTION.to_string(),
    })
}

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    state.products.list_products().await
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<Product> {
    let id = RefId::parse(id).ok_or_else(|| AppError::bad_request("Invalid product ID"))?;
    match state.products.find_product(id).await? {
        Some(product) => Ok(product),
        None => Err(AppError::not_found("Product not found")),
    }
}
