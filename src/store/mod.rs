//! Storage seams. Services only see these traits; the application state
//! carries whichever implementation was picked at startup.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Cart, CartItem, CartMerge, Product, RefId, RentalTransaction},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Table (collection) holding product listings.
pub const PRODUCTS_COLLECTION: &str = "products";

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: &Product) -> AppResult<()>;

    /// Every product in insertion order.
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    async fn find_product(&self, id: RefId) -> AppResult<Option<Product>>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Creates the user's cart if needed, then adds `item` to it, summing
    /// quantities when the product is already present. Implementations must
    /// not lose concurrent merges for the same user.
    async fn merge_cart_item(&self, user_id: RefId, item: CartItem) -> AppResult<CartMerge>;

    async fn find_cart(&self, user_id: RefId) -> AppResult<Option<Cart>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert_transaction(&self, transaction: &RentalTransaction) -> AppResult<()>;

    async fn find_transaction(&self, id: RefId) -> AppResult<Option<RentalTransaction>>;
}
