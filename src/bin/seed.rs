use std::sync::Arc;

use rental_marketplace_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::products::CreateProductRequest,
    models::RefId,
    services::product_service,
    state::AppState,
    store::PgStore,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let database_url = config
        .database_url
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set to seed"))?;

    let orm = create_orm_conn(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState::from_store(Arc::new(PgStore::new(orm)));

    let owner_id = RefId::new();
    seed_products(&state, owner_id).await?;

    println!("Seed completed. Owner ID: {owner_id}");
    Ok(())
}

async fn seed_products(state: &AppState, owner_id: RefId) -> anyhow::Result<()> {
    let products = vec![
        ("Cordless Drill", "18V drill with two batteries", 500.0, "day", "Pune", "Tools"),
        ("Camping Tent", "Four-person dome tent", 900.0, "day", "Manali", "Outdoors"),
        ("DSLR Camera", "24MP body with kit lens", 250.0, "hour", "Mumbai", "Electronics"),
        ("Studio Apartment", "Furnished, close to the metro", 18000.0, "month", "Bengaluru", "Housing"),
    ];

    for (name, description, price, renttype, location, category) in products {
        let created = product_service::create_product(
            state,
            CreateProductRequest {
                name: Some(name.into()),
                description: Some(description.into()),
                price: Some(json!(price)),
                renttype: Some(renttype.into()),
                location: Some(location.into()),
                category: Some(category.into()),
                images: None,
                owner_id: Some(owner_id.to_hex()),
            },
        )
        .await
        .map_err(|err| anyhow::anyhow!("seeding {name}: {err}"))?;
        println!("Seeded {name} ({})", created.product_id);
    }

    Ok(())
}
