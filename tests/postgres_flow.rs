use std::sync::Arc;

use chrono::Utc;
use rental_marketplace_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        cart::AddToCartRequest, products::CreateProductRequest,
        transactions::CreateTransactionRequest,
    },
    error::AppError,
    models::{CartMerge, QUANTITY_TOO_LARGE, RefId, RentalPrice},
    services::{cart_service, product_service, transaction_service},
    state::AppState,
    store::PgStore,
};
use sea_orm::{ConnectionTrait, Statement};
use serde_json::json;

// Integration flow against PostgreSQL: list a product, fill a cart from
// concurrent requests, record a rental.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn product_cart_and_transaction_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the postgres flow test."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let owner_id = RefId::new();

    // Product
    let created = product_service::create_product(
        &state,
        CreateProductRequest {
            name: Some("Drill".into()),
            description: Some("Cordless".into()),
            price: Some(json!(500)),
            renttype: Some("Day".into()),
            location: Some("X".into()),
            category: Some("Tools".into()),
            images: Some(json!(["drill.png"])),
            owner_id: Some(owner_id.to_hex()),
        },
    )
    .await?;
    let product = product_service::get_product(&state, &created.product_id.to_hex()).await?;
    assert_eq!(product.price, RentalPrice::Day(500.0));
    assert_eq!(product.images, vec!["drill.png".to_string()]);
    assert_eq!(product.owner_id, owner_id);
    assert_eq!(product_service::list_products(&state).await?.len(), 1);

    // Cart: concurrent adds for one user must all land
    let user_id = RefId::new();
    let product_id = product.id;
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move {
                cart_service::add_to_cart(
                    &state,
                    AddToCartRequest {
                        user_id: Some(user_id.to_hex()),
                        product_id: Some(product_id.to_hex()),
                        quantity: Some(json!(2)),
                        name: Some("Drill".into()),
                        price: Some(json!(500)),
                        category: Some("Tools".into()),
                        images: None,
                    },
                )
                .await
            })
        })
        .collect();

    let mut created_carts = 0;
    for handle in handles {
        if let CartMerge::Created(_) = handle.await?? {
            created_carts += 1;
        }
    }
    assert_eq!(created_carts, 1);

    let cart = cart_service::get_cart(&state, &user_id.to_hex()).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 20);
    assert_eq!(cart.items[0].product_id, product_id);

    // Cart: an add that would overflow the stored quantity is rejected
    let big_add = || AddToCartRequest {
        user_id: Some(user_id.to_hex()),
        product_id: Some(owner_id.to_hex()),
        quantity: Some(json!(i64::MAX)),
        ..Default::default()
    };
    cart_service::add_to_cart(&state, big_add()).await?;
    let err = cart_service::add_to_cart(&state, big_add())
        .await
        .expect_err("summed quantity overflows");
    assert!(matches!(err, AppError::BadRequest(message) if message == QUANTITY_TOO_LARGE));
    let cart = cart_service::get_cart(&state, &user_id.to_hex()).await?;
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.items[1].quantity, i64::MAX);

    // Transaction
    let recorded = transaction_service::create_transaction(
        &state,
        CreateTransactionRequest {
            product_id: Some(product_id.to_hex()),
            owner_id: Some(owner_id.to_hex()),
            renter_id: Some(user_id.to_hex()),
            renttype: Some("day".into()),
            duration: Some(json!(3)),
            total_amount: Some(json!(1500)),
            end_date: Some("2030-01-04".into()),
            ..Default::default()
        },
    )
    .await?;
    let transaction =
        transaction_service::get_transaction(&state, &recorded.transaction_id.to_hex()).await?;
    assert_eq!(transaction.payment_status.as_str(), "unpaid");
    assert_eq!(transaction.status.as_str(), "pending");
    assert_eq!(transaction.security_deposit, 0.0);
    assert!(transaction.start_date <= Utc::now());
    assert!(transaction.end_date.is_some());

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE cart_items, carts, rental_transactions, products",
    ))
    .await?;

    Ok(AppState::from_store(Arc::new(PgStore::new(orm))))
}
