use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::transactions::CreateTransactionRequest,
    error::AppResult,
    extract::JsonBody,
    models::RentalTransaction,
    response::{MessageResponse, TransactionCreated},
    services::transaction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/producttransaction", post(create_transaction))
        .route("/producttransaction/{id}", get(get_transaction))
}

#[utoipa::path(
    post,
    path = "/api/producttransaction",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded as pending and unpaid", body = TransactionCreated),
        (status = 400, description = "Missing or invalid field", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse),
    ),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<TransactionCreated>)> {
    let created = transaction_service::create_transaction(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/producttransaction/{id}",
    params(
        ("id" = String, Path, description = "Transaction ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Get transaction", body = RentalTransaction),
        (status = 400, description = "Malformed transaction ID", body = MessageResponse),
        (status = 404, description = "Transaction not found", body = MessageResponse),
    ),
    tag = "Transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RentalTransaction>> {
    let transaction = transaction_service::get_transaction(&state, &id).await?;
    Ok(Json(transaction))
}
