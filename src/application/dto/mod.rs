// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Principals are rendered as text, timestamps as RFC 3339
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{Document, Property, PropertyToken, Transaction, TransactionStatus};
use crate::services::{MarketplaceSnapshot, PurchaseReceipt, SessionInfo, TransactionOutcome};

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDto {
    pub authenticated: bool,
    pub principal: Option<String>,
    pub network: String,
    pub expires_at: Option<String>,
}

impl SessionDto {
    pub fn from_info(info: Option<SessionInfo>, network: &str) -> Self {
        match info {
            Some(info) => Self {
                authenticated: true,
                principal: Some(info.principal.to_text()),
                network: info.network.to_string(),
                expires_at: Some(info.expires_at.to_rfc3339()),
            },
            None => Self {
                authenticated: false,
                principal: None,
                network: network.to_string(),
                expires_at: None,
            },
        }
    }
}

// ============================================================================
// PROPERTY DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDto {
    pub id: u64,
    pub owner: String,
    pub price: f64,
    pub location: String,
    pub description: String,
    pub status: String,
    pub nft_id: Option<String>,
    pub token_id: Option<u64>,
    pub documents: Vec<DocumentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: u64,
    pub hash: String,
    pub kind: String,
    pub attached_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPropertyDto {
    pub price: f64,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDocumentDto {
    pub property_id: u64,
    /// "Inspection", "Contract", "Deed", "Title" or "Other"
    pub kind: String,
    pub content_hash: String,
}

impl From<Document> for DocumentDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            hash: document.hash.clone(),
            kind: document.kind.to_string(),
            attached_at: document.attached_at().to_rfc3339(),
        }
    }
}

impl From<Property> for PropertyDto {
    fn from(property: Property) -> Self {
        let token_id = property.linked_token_id();
        Self {
            id: property.id,
            owner: property.owner.to_text(),
            price: property.price,
            status: property.status.to_string(),
            location: property.location,
            description: property.description,
            nft_id: property.nft_id,
            token_id,
            documents: property.documents.into_iter().map(DocumentDto::from).collect(),
        }
    }
}

// ============================================================================
// TRANSACTION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDto {
    pub id: u64,
    pub property_id: u64,
    pub buyer: String,
    pub seller: String,
    pub price: f64,
    pub status: String,
    pub initiated_at: String,
    /// Whether the UI should offer a "complete" action
    pub completable: bool,
}

impl From<Transaction> for TransactionDto {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            property_id: transaction.property_id,
            buyer: transaction.buyer.to_text(),
            seller: transaction.seller.to_text(),
            price: transaction.price,
            status: transaction.status.to_string(),
            initiated_at: transaction.initiated_at().to_rfc3339(),
            completable: transaction
                .status
                .can_transition_to(TransactionStatus::Completed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutcomeDto {
    pub transaction_id: u64,
    pub completed: bool,
    pub message: String,
}

impl From<TransactionOutcome> for TransactionOutcomeDto {
    fn from(outcome: TransactionOutcome) -> Self {
        Self {
            transaction_id: outcome.transaction_id,
            completed: outcome.completed,
            message: outcome.message,
        }
    }
}

// ============================================================================
// TOKEN DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDto {
    pub token_id: u64,
    pub property_id: u64,
    pub owner: String,
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub has_image: bool,
    /// e.g. "2.50" for 250 basis points
    pub royalty_percentage: Option<String>,
    pub royalty_recipient: Option<String>,
    pub total_supply: u64,
    pub available_supply: u64,
    pub price_per_token: u64,
    /// "ckUSDT" or "ckUSDC"
    pub currency: String,
}

impl From<PropertyToken> for TokenDto {
    fn from(token: PropertyToken) -> Self {
        Self {
            royalty_percentage: token.royalty_percentage(),
            currency: token.currency.label().to_string(),
            token_id: token.token_id,
            property_id: token.property_id,
            owner: token.owner.to_text(),
            has_image: token.metadata.image.is_some(),
            royalty_recipient: token.metadata.royalty_recipient.map(|p| p.to_text()),
            name: token.metadata.name,
            symbol: token.metadata.symbol,
            description: token.metadata.description,
            total_supply: token.total_supply,
            available_supply: token.available_supply,
            price_per_token: token.price_per_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceDto {
    pub available: Vec<TokenDto>,
    pub held: Vec<TokenDto>,
}

impl From<MarketplaceSnapshot> for MarketplaceDto {
    fn from(snapshot: MarketplaceSnapshot) -> Self {
        Self {
            available: snapshot.available.into_iter().map(TokenDto::from).collect(),
            held: snapshot.held.into_iter().map(TokenDto::from).collect(),
        }
    }
}

/// Amounts arrive as text from an input box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseTokensDto {
    pub token_id: u64,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributeIncomeDto {
    pub token_id: u64,
    pub amount: String,
    pub use_usdt: bool,
}

// ============================================================================
// GENERIC
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcomeDto {
    pub success: bool,
    pub message: String,
}

impl From<PurchaseReceipt> for ActionOutcomeDto {
    fn from(receipt: PurchaseReceipt) -> Self {
        Self {
            success: true,
            message: receipt.message,
        }
    }
}
