pub mod entity;
pub mod invariants;

pub use entity::{PropertyToken, SettlementCurrency, TokenMetadata};
pub use invariants::{validate_distribution_amount, validate_purchase_amount, validate_token};
