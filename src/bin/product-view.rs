use rental_marketplace_api::view::{ProductView, fetch_product};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let Some(id) = args.next() else {
        anyhow::bail!("usage: product-view <product-id> [--rent]");
    };
    let rent = args.any(|arg| arg == "--rent");
    let base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5500/api".to_string());

    let client = reqwest::Client::new();
    let product = match fetch_product(&client, &base_url, &id).await {
        Ok(product) => product,
        Err(err) => {
            eprintln!("Failed to load product: {err:#}");
            None
        }
    };

    let Some(product) = product else {
        println!("Product not found");
        return Ok(());
    };

    let view = ProductView::from_json(&product);
    print!("{}", view.render());
    if rent {
        println!("{}", view.rent_notice());
    }
    Ok(())
}
