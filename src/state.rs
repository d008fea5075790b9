use std::sync::Arc;

use crate::store::{CartStore, ProductStore, TransactionStore};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub carts: Arc<dyn CartStore>,
    pub transactions: Arc<dyn TransactionStore>,
}

impl AppState {
    /// Wires every store seam to the same backing implementation.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ProductStore + CartStore + TransactionStore + 'static,
    {
        Self {
            products: store.clone(),
            carts: store.clone(),
            transactions: store,
        }
    }
}
