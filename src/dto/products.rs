use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Loosely typed so that wrong types produce the same 400 messages as
/// missing or out-of-range values.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>, example = 500)]
    pub price: Option<Value>,
    #[schema(example = "day")]
    pub renttype: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<Value>,
    #[schema(example = "665f1c2ab4d1e23a9c0f4b7e")]
    pub owner_id: Option<String>,
}
