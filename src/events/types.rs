// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use candid::Principal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Network;
use crate::domain::DocumentType;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted after an interactive login produced a usable channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEstablished {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub principal: Principal,
    pub network: Network,
    pub expires_at: DateTime<Utc>,
}

impl SessionEstablished {
    pub fn new(principal: Principal, network: Network, expires_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            principal,
            network,
            expires_at,
        }
    }
}

impl DomainEvent for SessionEstablished {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SessionEstablished" }
}

/// Emitted when a persisted session was picked up without interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRestored {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub principal: Principal,
    pub expires_at: DateTime<Utc>,
}

impl SessionRestored {
    pub fn new(principal: Principal, expires_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            principal,
            expires_at,
        }
    }
}

impl DomainEvent for SessionRestored {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SessionRestored" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub principal: Principal,
}

impl SessionEnded {
    pub fn new(principal: Principal) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            principal,
        }
    }
}

impl DomainEvent for SessionEnded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SessionEnded" }
}

// ============================================================================
// PROPERTY EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyListed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub property_id: u64,
    pub price: f64,
    pub location: String,
}

impl PropertyListed {
    pub fn new(property_id: u64, price: f64, location: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            property_id,
            price,
            location,
        }
    }
}

impl DomainEvent for PropertyListed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PropertyListed" }
}

/// Emitted only when the backend accepted the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub property_id: u64,
    pub kind: DocumentType,
    pub content_hash: String,
}

impl DocumentAdded {
    pub fn new(property_id: u64, kind: DocumentType, content_hash: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            property_id,
            kind,
            content_hash,
        }
    }
}

impl DomainEvent for DocumentAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DocumentAdded" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAssigned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub property_id: u64,
    pub agent: Principal,
}

impl AgentAssigned {
    pub fn new(property_id: u64, agent: Principal) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            property_id,
            agent,
        }
    }
}

impl DomainEvent for AgentAssigned {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "AgentAssigned" }
}

// ============================================================================
// TRANSACTION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInitiated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub transaction_id: u64,
    pub property_id: u64,
}

impl TransactionInitiated {
    pub fn new(transaction_id: u64, property_id: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            transaction_id,
            property_id,
        }
    }
}

impl DomainEvent for TransactionInitiated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TransactionInitiated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub transaction_id: u64,
}

impl TransactionCompleted {
    pub fn new(transaction_id: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            transaction_id,
        }
    }
}

impl DomainEvent for TransactionCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TransactionCompleted" }
}

// ============================================================================
// TOKEN EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensPurchased {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub token_id: u64,
    pub amount: u64,
}

impl TokensPurchased {
    pub fn new(token_id: u64, amount: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            token_id,
            amount,
        }
    }
}

impl DomainEvent for TokensPurchased {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TokensPurchased" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDistributed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub token_id: u64,
    pub amount: u64,
    pub use_usdt: bool,
}

impl IncomeDistributed {
    pub fn new(token_id: u64, amount: u64, use_usdt: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            token_id,
            amount,
            use_usdt,
        }
    }
}

impl DomainEvent for IncomeDistributed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "IncomeDistributed" }
}

/// Emitted after the marketplace listing was reloaded wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub available: usize,
    pub held: usize,
}

impl MarketplaceRefreshed {
    pub fn new(available: usize, held: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            available,
            held,
        }
    }
}

impl DomainEvent for MarketplaceRefreshed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MarketplaceRefreshed" }
}
