//! Client product page: fetches one product from the API and renders it.
//!
//! The page works on the raw JSON rather than [`crate::models::Product`],
//! the same way a browser client would.

use anyhow::Context;
use reqwest::StatusCode;
use serde_json::Value;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/500";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: String,
}

impl ProductView {
    pub fn from_json(product: &Value) -> Self {
        let image = product
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(Value::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE);

        // Reads `price`, then `pricepermonth`. The API stores
        // `pricePerHour`/`pricePerDay`/`pricePerMonth`, so this slot is
        // normally empty. Kept as-is until the intended display is settled.
        let price = ["price", "pricepermonth"]
            .iter()
            .filter_map(|key| product.get(*key))
            .find(|value| truthy(value))
            .map(display)
            .unwrap_or_default();

        Self {
            name: text(product, "name"),
            description: text(product, "description"),
            image: image.to_string(),
            category: text(product, "category"),
            price,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "[image] {image}\n\n{name}\n{description}\n\u{20b9}{price} / month\nCategory: {category}\n\n[ Rent Now ]\n",
            image = self.image,
            name = self.name,
            description = self.description,
            price = self.price,
            category = self.category,
        )
    }

    /// Shown by the "Rent Now" action. Nothing is sent to the API.
    pub fn rent_notice(&self) -> String {
        format!("{} booked successfully!", self.name)
    }
}

/// `Ok(None)` when the API answers 404.
pub async fn fetch_product(
    client: &reqwest::Client,
    base_url: &str,
    id: &str,
) -> anyhow::Result<Option<Value>> {
    let url = format!("{}/products/{}", base_url.trim_end_matches('/'), id);
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let response = response
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;
    Ok(Some(response.json().await?))
}

fn text(product: &Value, key: &str) -> String {
    product.get(key).map(display).unwrap_or_default()
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
