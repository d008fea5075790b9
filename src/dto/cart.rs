use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Loosely typed like the other request bodies so wrong types get the
/// service's 400 messages.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    /// Defaults to 1.
    #[schema(value_type = Option<i64>, example = 1)]
    pub quantity: Option<Value>,
    pub name: Option<String>,
    #[schema(value_type = Option<f64>, example = 500)]
    pub price: Option<Value>,
    pub category: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<Value>,
}
