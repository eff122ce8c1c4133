// src/lib.rs
// iREITs - client for the property tokenization canister
//
// Architecture:
// - Domain-centric: entities and client-side pre-checks live in `domain`
// - Event-driven: services announce facts on a synchronous event bus
// - Explicit session: one `SessionManager` owns identity and channel
// - Application layer: commands returning serializable DTOs

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod integrations;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_distribution_amount,
    validate_listing_price,
    validate_purchase_amount,
    validate_token,
    // Property
    Document,
    DocumentType,
    DomainError,
    Property,
    PropertyStatus,
    // Token
    PropertyToken,
    SettlementCurrency,
    TokenMetadata,
    // Transaction
    Transaction,
    TransactionStatus,
};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::{ClientConfig, Network};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    MarketplaceService,
    MarketplaceSnapshot,
    PropertyService,
    SessionInfo,
    SessionManager,
    TransactionOutcome,
    TransactionService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::{build_state, initialize, BootstrapOptions};
pub use application::AppState;

pub use application::commands;
pub use application::dto;
