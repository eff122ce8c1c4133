// src/integrations/canister/backend.rs
//
// The remote interface of the property/token/transaction canister, as seen by
// the client. One method per canister method; argument order and types match
// the canister's interface exactly.
//
// Absence (`None`, empty vec) is not an error. Transport failures are
// `AppError`s. Business rejections from purchase/distribution come back as
// `CallOutcome::Rejected`, not as errors.

use async_trait::async_trait;
use candid::Principal;

use crate::domain::{DocumentType, Property, PropertyToken, Transaction};
use crate::error::AppResult;

/// Discriminated result of a canister call that answers `Ok`/`Err(text)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Accepted,
    Rejected(String),
}

impl CallOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CallOutcome::Accepted)
    }
}

impl From<Result<candid::Reserved, String>> for CallOutcome {
    fn from(result: Result<candid::Reserved, String>) -> Self {
        match result {
            Ok(_) => CallOutcome::Accepted,
            Err(message) => CallOutcome::Rejected(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EstateBackend: Send + Sync {
    // ---- property directory ------------------------------------------------

    async fn get_all_properties(&self) -> AppResult<Vec<Property>>;

    async fn get_property(&self, property_id: u64) -> AppResult<Option<Property>>;

    async fn get_user_properties(&self, owner: Principal) -> AppResult<Vec<Property>>;

    async fn list_property(
        &self,
        price: f64,
        location: String,
        description: String,
    ) -> AppResult<Property>;

    async fn add_document(
        &self,
        property_id: u64,
        kind: DocumentType,
        content_hash: String,
    ) -> AppResult<bool>;

    async fn assign_agent(&self, property_id: u64, agent: Principal) -> AppResult<bool>;

    // ---- transactions ------------------------------------------------------

    async fn initiate_transaction(&self, property_id: u64) -> AppResult<u64>;

    async fn get_transaction(&self, transaction_id: u64) -> AppResult<Option<Transaction>>;

    async fn complete_transaction(&self, transaction_id: u64) -> AppResult<bool>;

    // ---- tokens ------------------------------------------------------------

    async fn get_token(&self, token_id: u64) -> AppResult<Option<PropertyToken>>;

    async fn get_user_tokens(&self, owner: Principal) -> AppResult<Vec<PropertyToken>>;

    async fn purchase_tokens(&self, token_id: u64, amount: u64) -> AppResult<CallOutcome>;

    async fn distribute_token_income(
        &self,
        token_id: u64,
        amount: u64,
        use_usdt: bool,
    ) -> AppResult<CallOutcome>;
}
