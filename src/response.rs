use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::RefId;

/// Body of every error response and of the plain cart update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
    pub message: String,
    pub product_id: RefId,
    pub collection_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartAdded {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<RefId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreated {
    pub message: String,
    pub transaction_id: RefId,
}
