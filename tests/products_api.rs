mod common;

use axum::http::StatusCode;
use common::{OWNER_ID, TestApp};
use rental_marketplace_api::store::ProductStore;
use serde_json::{Value, json};

fn drill() -> Value {
    json!({
        "name": "Drill",
        "description": "Cordless",
        "price": 500,
        "renttype": "Day",
        "location": "X",
        "category": "Tools",
        "ownerId": OWNER_ID
    })
}

fn with(mut body: Value, key: &str, value: Value) -> Value {
    body[key] = value;
    body
}

#[tokio::test]
async fn create_product_stores_single_price_field() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/addproduct", drill()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product added successfully");
    assert_eq!(body["collectionName"], "products");
    let product_id = body["productId"].as_str().unwrap().to_string();
    assert_eq!(product_id.len(), 24);

    let (status, product) = app.get(&format!("/api/products/{product_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["_id"], product_id);
    assert_eq!(product["pricePerDay"], 500.0);
    assert!(product.get("pricePerHour").is_none());
    assert!(product.get("pricePerMonth").is_none());
    assert_eq!(product["images"], json!([]));
    assert_eq!(product["ownerId"], OWNER_ID);
    assert_eq!(product["name"], "Drill");
    assert!(product["createdAt"].is_string());
    assert_eq!(product["createdAt"], product["updatedAt"]);
}

#[tokio::test]
async fn rent_type_selects_the_price_field() {
    let app = TestApp::new();

    for (renttype, field) in [
        ("hour", "pricePerHour"),
        ("DAY", "pricePerDay"),
        ("Month", "pricePerMonth"),
    ] {
        let body = with(drill(), "renttype", json!(renttype));
        let (status, created) = app.post("/api/addproduct", body).await;
        assert_eq!(status, StatusCode::CREATED, "renttype {renttype}");

        let id = created["productId"].as_str().unwrap();
        let (_, product) = app.get(&format!("/api/products/{id}")).await;
        let prices: Vec<&str> = ["pricePerHour", "pricePerDay", "pricePerMonth"]
            .into_iter()
            .filter(|key| product.get(*key).is_some())
            .collect();
        assert_eq!(prices, vec![field]);
        assert_eq!(product[field], 500.0);
    }
}

#[tokio::test]
async fn images_are_kept_in_order() {
    let app = TestApp::new();
    let body = with(drill(), "images", json!(["a.png", "b.png"]));

    let (_, created) = app.post("/api/addproduct", body).await;
    let id = created["productId"].as_str().unwrap();
    let (_, product) = app.get(&format!("/api/products/{id}")).await;

    assert_eq!(product["images"], json!(["a.png", "b.png"]));
}

#[tokio::test]
async fn invalid_rent_type_is_rejected_without_writing() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/addproduct", with(drill(), "renttype", json!("week")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid rent type");
    assert!(app.store.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_positive_or_non_numeric_price_is_rejected() {
    let app = TestApp::new();

    for price in [json!(0), json!(-10), json!(-0.5), json!("500"), json!(true)] {
        let (status, body) = app
            .post("/api/addproduct", with(drill(), "price", price.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {price}");
        assert_eq!(body["message"], "Price must be a positive number");
    }
    assert!(app.store.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = TestApp::new();

    for field in ["name", "description", "price", "renttype", "location", "category", "ownerId"] {
        let mut body = drill();
        body.as_object_mut().unwrap().remove(field);
        let (status, response) = app.post("/api/addproduct", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "without {field}");
        assert_eq!(response["message"], "Missing required fields");
    }

    let (status, _) = app.post("/api/addproduct", with(drill(), "name", json!(""))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn images_must_be_strings() {
    let app = TestApp::new();

    for images in [json!("a.png"), json!(["a.png", 7]), json!({ "0": "a.png" })] {
        let (status, body) = app
            .post("/api/addproduct", with(drill(), "images", images))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Images must be an array of strings");
    }
}

#[tokio::test]
async fn malformed_owner_id_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/addproduct", with(drill(), "ownerId", json!("owner-1")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ownerId");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.post_raw("/api/addproduct", "{ not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn get_product_distinguishes_bad_unknown_and_existing_ids() {
    let app = TestApp::new();
    let (_, created) = app.post("/api/addproduct", drill()).await;
    let (_, _) = app
        .post("/api/addproduct", with(drill(), "name", json!("Saw")))
        .await;
    let id = created["productId"].as_str().unwrap();

    let (status, body) = app.get("/api/products/not-an-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid product ID");

    let (status, body) = app.get("/api/products/000000000000000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, body) = app.get(&format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], id);
    assert_eq!(body["name"], "Drill");
}

#[tokio::test]
async fn list_products_returns_everything_in_insertion_order() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for name in ["Drill", "Saw", "Ladder"] {
        app.post("/api/addproduct", with(drill(), "name", json!(name)))
            .await;
    }

    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|product| product["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Drill", "Saw", "Ladder"]);
}
