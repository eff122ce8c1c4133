// src/services/marketplace_service.rs
//
// Marketplace Service - Token Discovery, Holdings and Trading
//
// CRITICAL RULES:
// - Purchase and distribution amounts are checked before any call is issued
// - The cached listing is replaced wholesale on every load
// - A backend `Err` text reaches the caller unchanged
// - Logout clears the cached listing

use std::sync::{Arc, PoisonError, RwLock};

use candid::Principal;
use log::{debug, info, warn};
use serde::Serialize;

use crate::domain::{
    validate_distribution_amount, validate_purchase_amount, validate_token, PropertyToken,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, IncomeDistributed, MarketplaceRefreshed, TokensPurchased};
use crate::integrations::{CallOutcome, EstateBackend};
use crate::services::SessionManager;

/// Tokens on offer plus the caller's holdings, as of one load
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketplaceSnapshot {
    pub available: Vec<PropertyToken>,
    pub held: Vec<PropertyToken>,
}

impl MarketplaceSnapshot {
    pub fn find(&self, token_id: u64) -> Option<&PropertyToken> {
        self.available
            .iter()
            .chain(self.held.iter())
            .find(|t| t.token_id == token_id)
    }
}

/// Request to buy units of a token
#[derive(Debug, Clone, Copy)]
pub struct PurchaseTokensRequest {
    pub token_id: u64,
    pub amount: u64,
}

/// Request to pay income out to a token's holders
#[derive(Debug, Clone, Copy)]
pub struct DistributeIncomeRequest {
    pub token_id: u64,
    pub amount: u64,
    pub use_usdt: bool,
}

/// Accepted purchase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseReceipt {
    pub token_id: u64,
    pub amount: u64,
    pub message: String,
}

pub struct MarketplaceService {
    session: Arc<SessionManager>,
    event_bus: Arc<EventBus>,
    snapshot: RwLock<Option<MarketplaceSnapshot>>,
}

impl MarketplaceService {
    pub fn new(session: Arc<SessionManager>, event_bus: Arc<EventBus>) -> Self {
        Self {
            session,
            event_bus,
            snapshot: RwLock::new(None),
        }
    }

    /// Tokens backed by a tokenized property that still have supply
    pub async fn discover_available_tokens(&self) -> AppResult<Vec<PropertyToken>> {
        let backend = self.session.reader().await?;
        discover(backend.as_ref()).await
    }

    pub async fn get_token(&self, token_id: u64) -> AppResult<Option<PropertyToken>> {
        self.session.reader().await?.get_token(token_id).await
    }

    pub async fn get_user_tokens(&self, owner: Principal) -> AppResult<Vec<PropertyToken>> {
        self.session.reader().await?.get_user_tokens(owner).await
    }

    /// Reload the listing and the caller's holdings, replacing the cache
    pub async fn load_marketplace(&self) -> AppResult<MarketplaceSnapshot> {
        let backend = self.session.reader().await?;
        let available = discover(backend.as_ref()).await?;

        let held = match self.session.principal() {
            Some(owner) => backend.get_user_tokens(owner).await?,
            None => Vec::new(),
        };

        let snapshot = MarketplaceSnapshot { available, held };
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());

        self.event_bus.emit(MarketplaceRefreshed::new(
            snapshot.available.len(),
            snapshot.held.len(),
        ));
        Ok(snapshot)
    }

    pub fn cached_snapshot(&self) -> Option<MarketplaceSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_cache(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Buy `amount` units of a token.
    ///
    /// The amount is checked against the last loaded record of the token
    /// (fetched on demand if none is cached). On acceptance the listing is
    /// reloaded so the new supply shows up.
    pub async fn purchase_tokens(&self, request: PurchaseTokensRequest) -> AppResult<PurchaseReceipt> {
        let backend = self.session.require_session()?;

        match self.known_token(request.token_id).await? {
            Some(token) => validate_purchase_amount(request.amount, &token)
                .map_err(|e| AppError::Validation(e.to_string()))?,
            None if request.amount == 0 => {
                return Err(AppError::Validation("Invalid purchase amount".to_string()))
            }
            None => debug!(
                "Token {} unknown locally, leaving the check to the backend",
                request.token_id
            ),
        }

        match backend.purchase_tokens(request.token_id, request.amount).await? {
            CallOutcome::Accepted => {
                info!("Purchased {} of token {}", request.amount, request.token_id);
                self.event_bus
                    .emit(TokensPurchased::new(request.token_id, request.amount));

                if let Err(e) = self.load_marketplace().await {
                    warn!("Failed to reload marketplace after purchase: {}", e);
                }

                Ok(PurchaseReceipt {
                    token_id: request.token_id,
                    amount: request.amount,
                    message: format!("Successfully purchased {} tokens!", request.amount),
                })
            }
            CallOutcome::Rejected(message) => Err(rejection(message, "Failed to purchase tokens")),
        }
    }

    pub async fn distribute_token_income(&self, request: DistributeIncomeRequest) -> AppResult<()> {
        let backend = self.session.require_session()?;
        validate_distribution_amount(request.amount)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        match backend
            .distribute_token_income(request.token_id, request.amount, request.use_usdt)
            .await?
        {
            CallOutcome::Accepted => {
                info!(
                    "Distributed {} to holders of token {}",
                    request.amount, request.token_id
                );
                self.event_bus.emit(IncomeDistributed::new(
                    request.token_id,
                    request.amount,
                    request.use_usdt,
                ));
                Ok(())
            }
            CallOutcome::Rejected(message) => {
                Err(rejection(message, "Failed to distribute income"))
            }
        }
    }

    async fn known_token(&self, token_id: u64) -> AppResult<Option<PropertyToken>> {
        let cached = self
            .cached_snapshot()
            .and_then(|s| s.find(token_id).cloned());
        match cached {
            Some(token) => Ok(Some(token)),
            None => self.get_token(token_id).await,
        }
    }
}

async fn discover(backend: &dyn EstateBackend) -> AppResult<Vec<PropertyToken>> {
    let properties = backend.get_all_properties().await?;

    let mut tokens = Vec::new();
    for property in properties.iter().filter(|p| p.is_listed_on_marketplace()) {
        let Some(token_id) = property.linked_token_id() else {
            continue;
        };

        let Some(token) = backend.get_token(token_id).await? else {
            debug!("Property {} links missing token {}", property.id, token_id);
            continue;
        };

        if token.property_id != property.id {
            debug!(
                "Token {} backs property {}, not {}",
                token_id, token.property_id, property.id
            );
            continue;
        }
        if let Err(e) = validate_token(&token) {
            warn!("Skipping token {}: {}", token_id, e);
            continue;
        }
        if token.has_available_supply() {
            tokens.push(token);
        }
    }
    Ok(tokens)
}

/// An empty `Err` text gets a generic message
fn rejection(message: String, fallback: &str) -> AppError {
    if message.trim().is_empty() {
        AppError::Rejected(fallback.to_string())
    } else {
        AppError::Rejected(message)
    }
}
