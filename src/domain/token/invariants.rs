use super::entity::PropertyToken;
use crate::domain::{DomainError, DomainResult};

/// A purchase must request at least one unit and no more than the token's
/// currently reported available supply
pub fn validate_purchase_amount(amount: u64, token: &PropertyToken) -> DomainResult<()> {
    if amount == 0 || amount > token.available_supply {
        return Err(DomainError::InvalidPurchaseAmount {
            requested: amount,
            available: token.available_supply,
        });
    }
    Ok(())
}

/// An income distribution must move a strictly positive amount
pub fn validate_distribution_amount(amount: u64) -> DomainResult<()> {
    if amount == 0 {
        return Err(DomainError::InvalidDistributionAmount);
    }
    Ok(())
}

/// A token record is well-formed when its available supply does not exceed
/// its total supply
pub fn validate_token(token: &PropertyToken) -> DomainResult<()> {
    if token.available_supply > token.total_supply {
        return Err(DomainError::InvariantViolation(format!(
            "Token {} reports available supply {} above total supply {}",
            token.token_id, token.available_supply, token.total_supply
        )));
    }
    Ok(())
}
