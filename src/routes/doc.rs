use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::AddToCartRequest, products::CreateProductRequest,
        transactions::CreateTransactionRequest,
    },
    models::{
        Cart, CartItem, PaymentStatus, Product, RefId, RentType, RentalPrice, RentalTransaction,
        TransactionStatus,
    },
    response::{CartAdded, MessageResponse, ProductCreated, TransactionCreated},
    routes::{cart, health, products, transactions},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::create_product,
        products::list_products,
        products::get_product,
        cart::add_to_cart,
        cart::get_cart,
        transactions::create_transaction,
        transactions::get_transaction
    ),
    components(
        schemas(
            RefId,
            RentType,
            RentalPrice,
            Product,
            Cart,
            CartItem,
            PaymentStatus,
            TransactionStatus,
            RentalTransaction,
            CreateProductRequest,
            AddToCartRequest,
            CreateTransactionRequest,
            ProductCreated,
            CartAdded,
            TransactionCreated,
            MessageResponse,
            health::HealthData
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Rental listings"),
        (name = "Cart", description = "Per-user carts"),
        (name = "Transactions", description = "Rental transactions"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
