// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod handlers;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Property
    AgentAssigned,
    DocumentAdded,
    PropertyListed,

    // Token
    IncomeDistributed,
    MarketplaceRefreshed,
    TokensPurchased,

    // Session
    SessionEnded,
    SessionEstablished,
    SessionRestored,

    // Transaction
    TransactionCompleted,
    TransactionInitiated,
};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_session_handlers;

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
