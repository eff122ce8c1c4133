// src/services/session_manager.rs
//
// Session Manager - Identity and Channel Ownership
//
// CRITICAL RULES:
// - Exactly one session at a time; every service reads it from here
// - Writes require an authenticated session
// - Reads fall back to an anonymous channel
// - Persisted sessions never hold key material

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use candid::Principal;
use chrono::{DateTime, Utc};
use ic_agent::identity::AnonymousIdentity;
use ic_agent::Identity;
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{ClientConfig, Network};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionEnded, SessionEstablished, SessionRestored};
use crate::infrastructure::{SessionStore, StoredSession};
use crate::integrations::identity::provider::sender_of;
use crate::integrations::{AuthorizationRequest, ChannelFactory, EstateBackend, IdentityProvider};

/// Public view of the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub principal: Principal,
    pub network: Network,
    pub expires_at: DateTime<Utc>,
}

struct Session {
    principal: Principal,
    backend: Arc<dyn EstateBackend>,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

pub struct SessionManager {
    config: ClientConfig,
    provider: Arc<dyn IdentityProvider>,
    channels: Arc<dyn ChannelFactory>,
    store: Arc<dyn SessionStore>,
    event_bus: Arc<EventBus>,
    current: RwLock<Option<Session>>,
    anonymous: RwLock<Option<Arc<dyn EstateBackend>>>,
    login_in_progress: AtomicBool,
}

impl SessionManager {
    pub fn new(
        config: ClientConfig,
        provider: Arc<dyn IdentityProvider>,
        channels: Arc<dyn ChannelFactory>,
        store: Arc<dyn SessionStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            provider,
            channels,
            store,
            event_bus,
            current: RwLock::new(None),
            anonymous: RwLock::new(None),
            login_in_progress: AtomicBool::new(false),
        }
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    /// Interactive login
    ///
    /// Only one authorization flow may run at a time; a second call while one
    /// is pending fails instead of opening another provider window.
    pub async fn login(&self) -> AppResult<SessionInfo> {
        if self.login_in_progress.swap(true, Ordering::SeqCst) {
            return Err(AppError::Auth("A login is already in progress".to_string()));
        }

        let result = self.run_login().await;
        self.login_in_progress.store(false, Ordering::SeqCst);
        result
    }

    async fn run_login(&self) -> AppResult<SessionInfo> {
        // Key-file providers never open the provider page, so a local network
        // without an identity canister can still log in
        let provider_url = match self.config.identity_provider_url() {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("No identity provider page: {}", e);
                None
            }
        };
        let request = AuthorizationRequest {
            provider_url,
            max_time_to_live_nanos: self.config.max_time_to_live_nanos,
        };

        let authorized = self.provider.authorize(&request).await?;
        let backend = self.channels.open(Arc::clone(&authorized.identity)).await?;

        let stored = StoredSession {
            principal: authorized.principal.to_text(),
            source: authorized.source.clone(),
            network: self.config.network,
            created_at: Utc::now(),
            expires_at: authorized.expires_at,
        };
        // The session is still usable in this process if persisting fails
        if let Err(e) = self.store.save(&stored) {
            warn!("Failed to persist session: {}", e);
        }

        let info = self.install(authorized.principal, backend, authorized.expires_at);

        info!("Logged in as {}", authorized.principal);
        self.event_bus.emit(SessionEstablished::new(
            authorized.principal,
            self.config.network,
            authorized.expires_at,
        ));

        Ok(info)
    }

    /// Drop the current session. Without one this does nothing.
    ///
    /// The in-memory session always ends. Failing to remove the persisted
    /// copy is only logged.
    pub fn logout(&self) -> AppResult<()> {
        let previous = self.write_current().take();

        if let Some(session) = previous {
            info!("Logged out {}", session.principal);
            self.event_bus.emit(SessionEnded::new(session.principal));
        }

        self.discard_persisted();
        Ok(())
    }

    /// Pick up a persisted session without interaction.
    ///
    /// A persisted session that is unreadable, expired, from another network
    /// or no longer matches its identity is discarded and yields `None`.
    pub async fn restore_session(&self) -> AppResult<Option<SessionInfo>> {
        let stored = match self.store.load() {
            Ok(Some(stored)) => stored,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!("Discarding unreadable session: {}", e);
                self.discard_persisted();
                return Ok(None);
            }
        };

        if stored.is_expired(Utc::now()) {
            info!("Persisted session for {} expired", stored.principal);
            self.discard_persisted();
            return Ok(None);
        }

        if stored.network != self.config.network {
            warn!(
                "Persisted session belongs to network {}, not {}",
                stored.network, self.config.network
            );
            self.discard_persisted();
            return Ok(None);
        }

        let Some((identity, principal)) = self.resume_identity(&stored).await else {
            self.discard_persisted();
            return Ok(None);
        };

        let backend = self.channels.open(identity).await?;
        let info = self.install(principal, backend, stored.expires_at);

        info!("Restored session for {}", principal);
        self.event_bus
            .emit(SessionRestored::new(principal, stored.expires_at));

        Ok(Some(info))
    }

    async fn resume_identity(
        &self,
        stored: &StoredSession,
    ) -> Option<(Arc<dyn Identity>, Principal)> {
        let identity = match self.provider.resume(&stored.source).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Could not resume identity: {}", e);
                return None;
            }
        };

        let principal = match sender_of(identity.as_ref()) {
            Ok(principal) => principal,
            Err(e) => {
                warn!("{}", e);
                return None;
            }
        };

        if principal.to_text() != stored.principal {
            warn!(
                "Identity now resolves to {}, persisted session was for {}",
                principal, stored.principal
            );
            return None;
        }

        Some((identity, principal))
    }

    fn discard_persisted(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear persisted session: {}", e);
        }
    }

    fn install(
        &self,
        principal: Principal,
        backend: Arc<dyn EstateBackend>,
        expires_at: DateTime<Utc>,
    ) -> SessionInfo {
        *self.write_current() = Some(Session {
            principal,
            backend,
            expires_at,
        });
        SessionInfo {
            principal,
            network: self.config.network,
            expires_at,
        }
    }

    /// The live session, if any. An expired session reads as none.
    pub fn current(&self) -> Option<SessionInfo> {
        let now = Utc::now();
        self.read_current()
            .as_ref()
            .filter(|s| s.is_live(now))
            .map(|s| SessionInfo {
                principal: s.principal,
                network: self.config.network,
                expires_at: s.expires_at,
            })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn principal(&self) -> Option<Principal> {
        self.current().map(|info| info.principal)
    }

    /// Channel for write operations
    pub fn require_session(&self) -> AppResult<Arc<dyn EstateBackend>> {
        match self.read_current().as_ref() {
            Some(session) if session.is_live(Utc::now()) => Ok(Arc::clone(&session.backend)),
            _ => Err(AppError::NotAuthenticated),
        }
    }

    /// Channel for read operations: the session's if there is one,
    /// otherwise an anonymous channel opened on first use
    pub async fn reader(&self) -> AppResult<Arc<dyn EstateBackend>> {
        if let Ok(backend) = self.require_session() {
            return Ok(backend);
        }

        if let Some(backend) = self.anonymous.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(backend));
        }

        let backend = self.channels.open(Arc::new(AnonymousIdentity)).await?;
        *self.anonymous.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&backend));
        Ok(backend)
    }

    fn read_current(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_current(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}
