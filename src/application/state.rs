// src/application/state.rs

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::events::EventBus;
use crate::services::{MarketplaceService, PropertyService, SessionManager, TransactionService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing.
/// Services are wired in `app::bootstrap` and passed here.
pub struct AppState {
    pub config: ClientConfig,
    pub event_bus: Arc<EventBus>,
    pub session: Arc<SessionManager>,
    pub property_service: Arc<PropertyService>,
    pub transaction_service: Arc<TransactionService>,
    pub marketplace_service: Arc<MarketplaceService>,
}
