use chrono::Utc;

use crate::{
    dto::transactions::CreateTransactionRequest,
    error::{AppError, AppResult},
    models::{PaymentStatus, RefId, RentalTransaction, TransactionStatus},
    response::TransactionCreated,
    state::AppState,
    validation::{self, MISSING_FIELDS},
};

pub async fn create_transaction(
    state: &AppState,
    payload: CreateTransactionRequest,
) -> AppResult<TransactionCreated> {
    let product_id = validation::required(payload.product_id)?;
    let owner_id = validation::required(payload.owner_id)?;
    let renter_id = validation::required(payload.renter_id)?;
    let renttype = validation::required(payload.renttype)?;
    let (Some(duration), Some(total_amount)) = (payload.duration, payload.total_amount) else {
        return Err(AppError::bad_request(MISSING_FIELDS));
    };

    let renttype = validation::rent_type(&renttype)?;
    let duration = validation::positive_number(&duration)
        .ok_or_else(|| AppError::bad_request("Duration must be a positive number"))?;
    let total_amount = validation::positive_number(&total_amount)
        .ok_or_else(|| AppError::bad_request("Total amount must be a positive number"))?;
    let security_deposit = match payload.security_deposit {
        None => 0.0,
        Some(deposit) => validation::non_negative_number(&deposit).ok_or_else(|| {
            AppError::bad_request("Security deposit must be a positive number or zero")
        })?,
    };

    let product_id = validation::ref_id(&product_id, "productId")?;
    let owner_id = validation::ref_id(&owner_id, "ownerId")?;
    let renter_id = validation::ref_id(&renter_id, "renterId")?;

    let now = Utc::now();
    let transaction_date =
        validation::timestamp(payload.transaction_date.as_deref(), "transactionDate")?;
    let start_date = validation::timestamp(payload.start_date.as_deref(), "startDate")?;
    let end_date = validation::timestamp(payload.end_date.as_deref(), "endDate")?;

    let transaction = RentalTransaction {
        id: RefId::new(),
        product_id,
        owner_id,
        renter_id,
        renttype,
        duration,
        total_amount,
        transaction_date: transaction_date.unwrap_or(now),
        start_date: start_date.unwrap_or(now),
        end_date,
        security_deposit,
        payment_status: PaymentStatus::Unpaid,
        status: TransactionStatus::Pending,
        notes: payload.notes.unwrap_or_default(),
        created_at: now,
    };
    state.transactions.insert_transaction(&transaction).await?;

    tracing::info!(
        transaction_id = %transaction.id,
        %product_id,
        %renter_id,
        renttype = %renttype,
        total_amount,
        "rental transaction recorded"
    );

    Ok(TransactionCreated {
        message: "Product transaction recorded successfully".to_string(),
        transaction_id: transaction.id,
    })
}

pub async fn get_transaction(state: &AppState, id: &str) -> AppResult<RentalTransaction> {
    let id = RefId::parse(id).ok_or_else(|| AppError::bad_request("Invalid transaction ID"))?;
    match state.transactions.find_transaction(id).await? {
        Some(transaction) => Ok(transaction),
        None => Err(AppError::not_found("Transaction not found")),
    }
}
