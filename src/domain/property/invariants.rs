// Invariants the client checks before listing a property:
//
// 1. Price is finite (no NaN or infinity crosses the wire)
// 2. Price is >= 0
//
// Everything else (ownership, status) is decided by the backend.

use crate::domain::{DomainError, DomainResult};

/// A listing price must be a finite, non-negative amount
pub fn validate_listing_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Listing price must be a non-negative amount, got {}",
            price
        )));
    }
    Ok(())
}
