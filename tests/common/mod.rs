#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use async_trait::async_trait;
use rental_marketplace_api::{
    error::AppResult,
    models::{Cart, CartItem, CartMerge, Product, RefId, RentalTransaction},
    routes::create_app,
    state::AppState,
    store::{CartStore, MemoryStore, ProductStore, TransactionStore},
};
use serde_json::Value;
use tower::ServiceExt;

pub const OWNER_ID: &str = "665f1c2ab4d1e23a9c0f4b7e";
pub const RENTER_ID: &str = "665f1c2ab4d1e23a9c0f4b7f";
pub const USER_ID: &str = "665f1c2ab4d1e23a9c0f4b80";
pub const PRODUCT_ID: &str = "665f1c2ab4d1e23a9c0f4b81";

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let app = create_app(AppState::from_store(store.clone()));
        Self { app, store }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(post_request(uri, body)).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        self.send(raw_post_request(uri, body)).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send_to(self.app.clone(), request).await
    }
}

pub fn post_request(uri: &str, body: Value) -> Request<Body> {
    raw_post_request(uri, body.to_string())
}

fn raw_post_request(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Cause text carried by every [`FailingStore`] error; must never reach a client.
pub const STORAGE_FAILURE: &str = "connection refused by db-primary.internal:5432";

/// Store whose every call fails, one error flavour per seam.
pub struct FailingStore;

#[async_trait]
impl ProductStore for FailingStore {
    async fn insert_product(&self, _product: &Product) -> AppResult<()> {
        Err(sea_orm::DbErr::Custom(STORAGE_FAILURE.into()).into())
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Err(sea_orm::DbErr::Custom(STORAGE_FAILURE.into()).into())
    }

    async fn find_product(&self, _id: RefId) -> AppResult<Option<Product>> {
        Err(sea_orm::DbErr::Custom(STORAGE_FAILURE.into()).into())
    }
}

#[async_trait]
impl CartStore for FailingStore {
    async fn merge_cart_item(&self, _user_id: RefId, _item: CartItem) -> AppResult<CartMerge> {
        Err(sqlx::Error::Protocol(STORAGE_FAILURE.into()).into())
    }

    async fn find_cart(&self, _user_id: RefId) -> AppResult<Option<Cart>> {
        Err(sqlx::Error::Protocol(STORAGE_FAILURE.into()).into())
    }
}

#[async_trait]
impl TransactionStore for FailingStore {
    async fn insert_transaction(&self, _transaction: &RentalTransaction) -> AppResult<()> {
        Err(anyhow::anyhow!(STORAGE_FAILURE).into())
    }

    async fn find_transaction(&self, _id: RefId) -> AppResult<Option<RentalTransaction>> {
        Err(anyhow::anyhow!(STORAGE_FAILURE).into())
    }
}

pub fn failing_app() -> Router {
    create_app(AppState::from_store(Arc::new(FailingStore)))
}
