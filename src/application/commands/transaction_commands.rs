// src/application/commands/transaction_commands.rs
//
// Transaction Command Handlers

use crate::application::dto::{TransactionDto, TransactionOutcomeDto};
use crate::application::error_handling::{CommandResult, ToErrorResponse};
use crate::application::state::AppState;

/// Start buying a property; returns the new transaction id
pub async fn initiate_transaction(state: &AppState, property_id: u64) -> CommandResult<u64> {
    state
        .transaction_service
        .initiate_transaction(property_id)
        .await
        .to_error_response("initiate transaction")
}

pub async fn get_transaction(
    state: &AppState,
    transaction_id: u64,
) -> CommandResult<Option<TransactionDto>> {
    let transaction = state
        .transaction_service
        .get_transaction(transaction_id)
        .await
        .to_error_response("load transaction")?;

    Ok(transaction.map(TransactionDto::from))
}

/// A declined completion is a successful call with `completed: false`
pub async fn complete_transaction(
    state: &AppState,
    transaction_id: u64,
) -> CommandResult<TransactionOutcomeDto> {
    let outcome = state
        .transaction_service
        .complete_transaction(transaction_id)
        .await
        .to_error_response("complete transaction")?;

    Ok(TransactionOutcomeDto::from(outcome))
}
