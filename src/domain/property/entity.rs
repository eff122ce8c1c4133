use candid::Principal;
use serde::{Deserialize, Serialize};

use crate::domain::Document;

/// A real-estate listing registered with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Backend-assigned identifier
    pub id: u64,

    /// Identity that currently owns the listing
    pub owner: Principal,

    /// Asking price
    pub price: f64,

    pub location: String,

    pub description: String,

    /// Lifecycle status, owned by the backend
    pub status: PropertyStatus,

    /// Legacy NFT reference (textual) if the property was minted
    pub nft_id: Option<String>,

    /// Fractional-ownership token layered over this property
    pub token_id: Option<u64>,

    /// Attached documents, in attachment order
    pub documents: Vec<Document>,
}

/// Listing status of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    Available,
    Sold,
    UnderContract,
    Tokenized,
}

impl Property {
    /// Token the marketplace should fetch for this property.
    ///
    /// Prefers the numeric `token_id`; falls back to an `nft_id` that holds a
    /// decimal token id. Anything else is treated as "no linked token".
    pub fn linked_token_id(&self) -> Option<u64> {
        self.token_id
            .or_else(|| self.nft_id.as_deref().and_then(|s| s.trim().parse().ok()))
    }

    /// Tokenized and carrying a resolvable token link
    pub fn is_listed_on_marketplace(&self) -> bool {
        self.status == PropertyStatus::Tokenized && self.linked_token_id().is_some()
    }

    /// Case-insensitive substring match on location and description.
    /// An empty (or whitespace) query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.location.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyStatus::Available => write!(f, "Available"),
            PropertyStatus::Sold => write!(f, "Sold"),
            PropertyStatus::UnderContract => write!(f, "UnderContract"),
            PropertyStatus::Tokenized => write!(f, "Tokenized"),
        }
    }
}
