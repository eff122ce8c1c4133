// src/domain/mod.rs
//
// Domain Root - client-side view of the entities owned by the backend canister
//
// The canister is the authority on every state transition. The rules here are
// pre-checks the client runs before issuing a call, never a replacement for the
// backend's own validation.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod document;
pub mod property;
pub mod time;
pub mod token;
pub mod transaction;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Property Domain
pub use property::{validate_listing_price, Property, PropertyStatus};

// Document
pub use document::{Document, DocumentType};

// Transaction Domain
pub use transaction::{Transaction, TransactionStatus};

// Token Domain
pub use token::{
    validate_distribution_amount, validate_purchase_amount, validate_token, PropertyToken,
    SettlementCurrency, TokenMetadata,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of the client-side pre-checks
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid purchase amount")]
    InvalidPurchaseAmount { requested: u64, available: u64 },

    #[error("Invalid distribution amount")]
    InvalidDistributionAmount,

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
