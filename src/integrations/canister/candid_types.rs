// src/integrations/canister/candid_types.rs
//
// Candid wire shapes of the backend canister interface.
//
// These mirror the canister's `.did` exactly (field names, variant names,
// integer widths). They stay private to the integration layer; services only
// ever see the domain types they map into.

use candid::{CandidType, Deserialize, Principal, Reserved};

use crate::domain::{
    Document, DocumentType, Property, PropertyStatus, PropertyToken, SettlementCurrency,
    TokenMetadata, Transaction, TransactionStatus,
};

#[derive(CandidType, Deserialize, Debug, Clone)]
pub(crate) struct WireProperty {
    pub id: u64,
    pub owner: Principal,
    pub price: f64,
    pub location: String,
    pub description: String,
    pub status: WirePropertyStatus,
    pub nft_id: Option<String>,
    /// Not declared by every backend revision; absent decodes as `None`.
    pub token_id: Option<u64>,
    pub documents: Vec<WireDocument>,
}

#[derive(CandidType, Deserialize, Debug, Clone, Copy)]
pub(crate) enum WirePropertyStatus {
    Available,
    Sold,
    UnderContract,
    Tokenized,
}

#[derive(CandidType, Deserialize, Debug, Clone)]
pub(crate) struct WireDocument {
    pub id: u64,
    pub hash: String,
    pub timestamp: u64,
    pub doc_type: WireDocumentType,
}

#[derive(CandidType, Deserialize, Debug, Clone, Copy)]
pub(crate) enum WireDocumentType {
    Inspection,
    Contract,
    Deed,
    Title,
    Other,
}

#[derive(CandidType, Deserialize, Debug, Clone)]
pub(crate) struct WireTransaction {
    pub id: u64,
    pub property_id: u64,
    pub seller: Principal,
    pub buyer: Principal,
    pub price: f64,
    pub status: WireTransactionStatus,
    pub timestamp: u64,
}

#[derive(CandidType, Deserialize, Debug, Clone, Copy)]
pub(crate) enum WireTransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Only the fields the client reads. Candid record subtyping lets the
/// canister send more (circulating supply, holders, ...) without breaking us.
#[derive(CandidType, Deserialize, Debug, Clone)]
pub(crate) struct WirePropertyToken {
    pub token_id: u64,
    pub owner: Principal,
    pub metadata: WireTokenMetadata,
    pub property_id: u64,
    pub total_supply: u64,
    pub price_per_token: u64,
    pub available_supply: u64,
    pub use_usdt: bool,
}

#[derive(CandidType, Deserialize, Debug, Clone)]
pub(crate) struct WireTokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image: Option<Vec<u8>>,
    pub royalties: Option<u16>,
    pub royalty_recipient: Option<Principal>,
}

/// `variant { Ok: <anything>; Err: text }` returned by purchase and
/// distribution calls. The Ok payload is not interpreted.
pub(crate) type WireCallResult = Result<Reserved, String>;

// ============================================================================
// WIRE → DOMAIN
// ============================================================================

impl From<WirePropertyStatus> for PropertyStatus {
    fn from(status: WirePropertyStatus) -> Self {
        match status {
            WirePropertyStatus::Available => PropertyStatus::Available,
            WirePropertyStatus::Sold => PropertyStatus::Sold,
            WirePropertyStatus::UnderContract => PropertyStatus::UnderContract,
            WirePropertyStatus::Tokenized => PropertyStatus::Tokenized,
        }
    }
}

impl From<WireDocumentType> for DocumentType {
    fn from(kind: WireDocumentType) -> Self {
        match kind {
            WireDocumentType::Inspection => DocumentType::Inspection,
            WireDocumentType::Contract => DocumentType::Contract,
            WireDocumentType::Deed => DocumentType::Deed,
            WireDocumentType::Title => DocumentType::Title,
            WireDocumentType::Other => DocumentType::Other,
        }
    }
}

impl From<DocumentType> for WireDocumentType {
    fn from(kind: DocumentType) -> Self {
        match kind {
            DocumentType::Inspection => WireDocumentType::Inspection,
            DocumentType::Contract => WireDocumentType::Contract,
            DocumentType::Deed => WireDocumentType::Deed,
            DocumentType::Title => WireDocumentType::Title,
            DocumentType::Other => WireDocumentType::Other,
        }
    }
}

impl From<WireTransactionStatus> for TransactionStatus {
    fn from(status: WireTransactionStatus) -> Self {
        match status {
            WireTransactionStatus::Pending => TransactionStatus::Pending,
            WireTransactionStatus::Completed => TransactionStatus::Completed,
            WireTransactionStatus::Cancelled => TransactionStatus::Cancelled,
        }
    }
}

impl From<WireDocument> for Document {
    fn from(doc: WireDocument) -> Self {
        Document {
            id: doc.id,
            hash: doc.hash,
            timestamp: doc.timestamp,
            kind: doc.doc_type.into(),
        }
    }
}

impl From<WireProperty> for Property {
    fn from(p: WireProperty) -> Self {
        Property {
            id: p.id,
            owner: p.owner,
            price: p.price,
            location: p.location,
            description: p.description,
            status: p.status.into(),
            nft_id: p.nft_id,
            token_id: p.token_id,
            documents: p.documents.into_iter().map(Document::from).collect(),
        }
    }
}

impl From<WireTransaction> for Transaction {
    fn from(t: WireTransaction) -> Self {
        Transaction {
            id: t.id,
            property_id: t.property_id,
            buyer: t.buyer,
            seller: t.seller,
            price: t.price,
            status: t.status.into(),
            timestamp: t.timestamp,
        }
    }
}

impl From<WirePropertyToken> for PropertyToken {
    fn from(t: WirePropertyToken) -> Self {
        PropertyToken {
            token_id: t.token_id,
            owner: t.owner,
            metadata: TokenMetadata {
                name: t.metadata.name,
                symbol: t.metadata.symbol,
                description: t.metadata.description,
                image: t.metadata.image,
                royalties: t.metadata.royalties,
                royalty_recipient: t.metadata.royalty_recipient,
            },
            property_id: t.property_id,
            total_supply: t.total_supply,
            available_supply: t.available_supply,
            price_per_token: t.price_per_token,
            currency: SettlementCurrency::from_use_usdt(t.use_usdt),
        }
    }
}
