// src/app/bootstrap.rs
//
// Client Initialization
//
// Wires identity, channels, persistence, services and event handlers into an
// `AppState`, then picks up a persisted session if there is one.
//
// CRITICAL RULES:
// - One event bus and one session manager per process
// - Handlers are registered before any session can change
// - A missing or stale persisted session is not a startup failure

use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::application::AppState;
use crate::config::ClientConfig;
use crate::error::AppResult;
use crate::events::{register_session_handlers, EventBus};
use crate::infrastructure::{FileSessionStore, SessionStore};
use crate::integrations::{AgentChannelFactory, ChannelFactory, IdentityProvider, PemIdentityProvider};
use crate::services::{MarketplaceService, PropertyService, SessionManager, TransactionService};

/// Options for `initialize`
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Key file used to authorize on `login`
    pub identity_file: PathBuf,

    /// Try to resume a persisted session during startup
    pub restore_session: bool,
}

/// Builds the application state from its outer dependencies.
///
/// # Arguments
/// * `config` - Network, canister and session settings
/// * `provider` - Identity provider used by `login` and restore
/// * `channels` - Builds a backend channel for an identity
/// * `store` - Where the session is persisted
pub fn build_state(
    config: ClientConfig,
    provider: Arc<dyn IdentityProvider>,
    channels: Arc<dyn ChannelFactory>,
    store: Arc<dyn SessionStore>,
) -> AppState {
    // 1. INFRASTRUCTURE
    let event_bus = Arc::new(EventBus::new());

    // 2. SERVICES
    let session = Arc::new(SessionManager::new(
        config.clone(),
        provider,
        channels,
        store,
        event_bus.clone(),
    ));
    let property_service = Arc::new(PropertyService::new(session.clone(), event_bus.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        session.clone(),
        event_bus.clone(),
    ));
    let marketplace_service = Arc::new(MarketplaceService::new(
        session.clone(),
        event_bus.clone(),
    ));

    // 3. EVENT HANDLER REGISTRATION
    register_session_handlers(&event_bus, marketplace_service.clone());

    AppState {
        config,
        event_bus,
        session,
        property_service,
        transaction_service,
        marketplace_service,
    }
}

/// Builds the production client: ic-agent channels, key-file identity and
/// a session file on disk.
pub async fn initialize(config: ClientConfig, options: BootstrapOptions) -> AppResult<AppState> {
    info!(
        "Initializing client for canister {} on {} ({})",
        config.backend_canister_id, config.network, config.host
    );

    let provider: Arc<dyn IdentityProvider> =
        Arc::new(PemIdentityProvider::new(options.identity_file));
    let channels: Arc<dyn ChannelFactory> = Arc::new(AgentChannelFactory::new(&config)?);
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_file.clone()));

    let state = build_state(config, provider, channels, store);

    if options.restore_session {
        match state.session.restore_session().await? {
            Some(session) => info!("Resumed session for {}", session.principal),
            None => info!("No session to resume"),
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SessionEnded;
    use crate::integrations::canister::fake::InMemoryBackend;
    use crate::services::test_support::{test_config, FakeChannels, FakeProvider, MemorySessionStore};
    use candid::Principal;

    #[test]
    fn test_build_state_registers_session_handlers() {
        let state = build_state(
            test_config(),
            Arc::new(FakeProvider::default()),
            Arc::new(FakeChannels::new(Arc::new(InMemoryBackend::new(
                Principal::anonymous(),
            )))),
            Arc::new(MemorySessionStore::default()),
        );

        assert_eq!(state.event_bus.subscriber_count::<SessionEnded>(), 1);
        assert!(!state.session.is_authenticated());
    }
}
