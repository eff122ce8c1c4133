// src/application/commands/token_commands.rs
//
// Token Marketplace Command Handlers
//
// Amounts arrive as text; anything that is not a whole number of units is
// reported with the same message as an out-of-range amount.

use crate::application::commands::parse_principal;
use crate::application::dto::*;
use crate::application::error_handling::{CommandResult, ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::services::{DistributeIncomeRequest, PurchaseTokensRequest};

/// Reload available tokens and the caller's holdings
pub async fn load_marketplace(state: &AppState) -> CommandResult<MarketplaceDto> {
    let snapshot = state
        .marketplace_service
        .load_marketplace()
        .await
        .to_error_response("load tokens")?;

    Ok(MarketplaceDto::from(snapshot))
}

pub async fn get_token(state: &AppState, token_id: u64) -> CommandResult<Option<TokenDto>> {
    let token = state
        .marketplace_service
        .get_token(token_id)
        .await
        .to_error_response("load token")?;

    Ok(token.map(TokenDto::from))
}

pub async fn get_user_tokens(state: &AppState, owner: &str) -> CommandResult<Vec<TokenDto>> {
    let owner = parse_principal(owner)?;
    let tokens = state
        .marketplace_service
        .get_user_tokens(owner)
        .await
        .to_error_response("load tokens")?;

    Ok(tokens.into_iter().map(TokenDto::from).collect())
}

pub async fn purchase_tokens(
    state: &AppState,
    dto: PurchaseTokensDto,
) -> CommandResult<ActionOutcomeDto> {
    let amount = parse_amount(&dto.amount, "Invalid purchase amount")?;
    let receipt = state
        .marketplace_service
        .purchase_tokens(PurchaseTokensRequest {
            token_id: dto.token_id,
            amount,
        })
        .await
        .to_error_response("purchase tokens")?;

    Ok(ActionOutcomeDto::from(receipt))
}

pub async fn distribute_token_income(
    state: &AppState,
    dto: DistributeIncomeDto,
) -> CommandResult<ActionOutcomeDto> {
    let amount = parse_amount(&dto.amount, "Invalid distribution amount")?;
    state
        .marketplace_service
        .distribute_token_income(DistributeIncomeRequest {
            token_id: dto.token_id,
            amount,
            use_usdt: dto.use_usdt,
        })
        .await
        .to_error_response("distribute income")?;

    Ok(ActionOutcomeDto {
        success: true,
        message: format!("Distributed {} to holders of token {}", amount, dto.token_id),
    })
}

/// An empty box means zero
fn parse_amount(raw: &str, message: &str) -> CommandResult<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>()
        .map_err(|_| ErrorResponse::validation(message.to_string()))
}
