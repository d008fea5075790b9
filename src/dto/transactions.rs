use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// `paymentStatus` and `status` are not accepted; creation always sets them.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub product_id: Option<String>,
    pub owner_id: Option<String>,
    pub renter_id: Option<String>,
    pub renttype: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub duration: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Value>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub transaction_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub security_deposit: Option<Value>,
    pub notes: Option<String>,
}
