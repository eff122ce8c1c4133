// src/events/handlers/session_handler.rs
//
// Session Event Handlers
//
// Keeps session-scoped caches in step with the session lifecycle.
// Delegates all work to the services; holds no logic of its own.

use std::sync::Arc;

use log::debug;

use crate::events::{EventBus, SessionEnded, SessionEstablished};
use crate::services::MarketplaceService;

/// Registers all session handlers with the event bus.
pub fn register_session_handlers(bus: &EventBus, marketplace: Arc<MarketplaceService>) {
    // Holdings in the cached listing belong to the previous principal
    let on_login = Arc::clone(&marketplace);
    bus.subscribe::<SessionEstablished, _>(move |event| {
        debug!("Clearing marketplace cache for new session {}", event.principal);
        on_login.clear_cache();
    });

    let on_logout = Arc::clone(&marketplace);
    bus.subscribe::<SessionEnded, _>(move |event| {
        debug!("Clearing marketplace cache after {} logged out", event.principal);
        on_logout.clear_cache();
    });

    debug!("Session handlers registered");
}
