// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod marketplace_service;
pub mod property_service;
pub mod session_manager;
pub mod transaction_service;

#[cfg(test)]
mod marketplace_service_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use session_manager::{SessionInfo, SessionManager};

pub use property_service::{
    hash_file,
    AddDocumentRequest,
    ListPropertyRequest,
    PropertyService,
    POPULAR_SEARCHES,
};

pub use transaction_service::{
    TransactionOutcome,
    TransactionService,
};

pub use marketplace_service::{
    DistributeIncomeRequest,
    MarketplaceService,
    MarketplaceSnapshot,
    PurchaseReceipt,
    PurchaseTokensRequest,
};
