use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::{
    error::AppResult,
    models::{Cart, CartItem, CartMerge, Product, RefId, RentalTransaction},
    store::{CartStore, ProductStore, TransactionStore},
};

/// Process-local store used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    carts: Mutex<HashMap<RefId, Cart>>,
    transactions: RwLock<Vec<RentalTransaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn cart_count(&self) -> usize {
        self.carts.lock().await.len()
    }

    pub async fn transactions(&self) -> Vec<RentalTransaction> {
        self.transactions.read().await.clone()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: &Product) -> AppResult<()> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_product(&self, id: RefId) -> AppResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn merge_cart_item(&self, user_id: RefId, item: CartItem) -> AppResult<CartMerge> {
        let now = item.added_at;
        // Held across the whole read-modify-write.
        let mut carts = self.carts.lock().await;
        let merge = match carts.entry(user_id) {
            Entry::Occupied(mut entry) => {
                let cart = entry.get_mut();
                cart.merge_item(item, now)?;
                CartMerge::Updated(cart.id)
            }
            Entry::Vacant(entry) => {
                let cart = entry.insert(Cart::new(user_id, item, now));
                CartMerge::Created(cart.id)
            }
        };
        Ok(merge)
    }

    async fn find_cart(&self, user_id: RefId) -> AppResult<Option<Cart>> {
        Ok(self.carts.lock().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn insert_transaction(&self, transaction: &RentalTransaction) -> AppResult<()> {
        self.transactions.write().await.push(transaction.clone());
        Ok(())
    }

    async fn find_transaction(&self, id: RefId) -> AppResult<Option<RentalTransaction>> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .find(|transaction| transaction.id == id)
            .cloned())
    }
}
