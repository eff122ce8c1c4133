// src/services/test_support.rs
//
// Shared fakes for service tests

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candid::Principal;
use chrono::Utc;
use ic_agent::identity::AnonymousIdentity;
use ic_agent::Identity;

use crate::config::{ClientConfig, Network};
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::infrastructure::{SessionStore, StoredSession};
use crate::integrations::{
    AuthorizationRequest, AuthorizedIdentity, ChannelFactory, EstateBackend, IdentityProvider,
    IdentitySource,
};

use super::SessionManager;

pub const BACKEND_CANISTER: &str = "bkyz2-fmaaa-aaaaa-qaaaq-cai";
pub const IDENTITY_CANISTER: &str = "be2us-64aaa-aaaaa-qaabq-cai";

pub fn test_config() -> ClientConfig {
    ClientConfig {
        network: Network::Local,
        host: Network::Local.default_host().to_string(),
        backend_canister_id: Principal::from_text(BACKEND_CANISTER).unwrap(),
        identity_canister_id: Some(Principal::from_text(IDENTITY_CANISTER).unwrap()),
        session_file: PathBuf::from("/tmp/unused-session.json"),
        max_time_to_live_nanos: 604_800_000_000_000,
    }
}

pub fn key_source() -> IdentitySource {
    IdentitySource::PemFile {
        path: PathBuf::from("/keys/identity.pem"),
    }
}

/// Identity provider that signs everything as the anonymous principal
#[derive(Default)]
pub struct FakeProvider {
    pub cancel: bool,
    pub requests: Mutex<Vec<AuthorizationRequest>>,
}

impl FakeProvider {
    pub fn cancelling() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn authorize(&self, request: &AuthorizationRequest) -> AppResult<AuthorizedIdentity> {
        self.requests.lock().unwrap().push(request.clone());
        if self.cancel {
            return Err(AppError::Auth("UserInterrupt".to_string()));
        }
        Ok(AuthorizedIdentity {
            identity: Arc::new(AnonymousIdentity),
            principal: Principal::anonymous(),
            source: key_source(),
            expires_at: request.expires_at(Utc::now()),
        })
    }

    async fn resume(&self, _source: &IdentitySource) -> AppResult<Arc<dyn Identity>> {
        Ok(Arc::new(AnonymousIdentity))
    }
}

/// Hands out the same backend for every identity
pub struct FakeChannels {
    backend: Arc<dyn EstateBackend>,
    pub opened: AtomicUsize,
}

impl FakeChannels {
    pub fn new(backend: Arc<dyn EstateBackend>) -> Self {
        Self {
            backend,
            opened: AtomicUsize::new(0),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelFactory for FakeChannels {
    async fn open(&self, _identity: Arc<dyn Identity>) -> AppResult<Arc<dyn EstateBackend>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.backend))
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    pub session: Mutex<Option<StoredSession>>,
    pub corrupt: bool,
    pub fail_clear: bool,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> AppResult<Option<StoredSession>> {
        if self.corrupt {
            return Err(AppError::Other("corrupt session file".to_string()));
        }
        Ok(self.session.lock().unwrap().clone())
    }

    fn save(&self, session: &StoredSession) -> AppResult<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if self.fail_clear {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "session file is read-only",
            )));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

pub fn session_manager(
    backend: Arc<dyn EstateBackend>,
) -> (Arc<SessionManager>, Arc<FakeChannels>, Arc<EventBus>) {
    let channels = Arc::new(FakeChannels::new(backend));
    let bus = Arc::new(EventBus::new());
    let manager = Arc::new(SessionManager::new(
        test_config(),
        Arc::new(FakeProvider::default()),
        channels.clone(),
        Arc::new(MemorySessionStore::default()),
        Arc::clone(&bus),
    ));
    (manager, channels, bus)
}

/// Fully wired state over `backend`, not logged in
pub fn app_state(backend: Arc<dyn EstateBackend>) -> crate::application::AppState {
    crate::app::build_state(
        test_config(),
        Arc::new(FakeProvider::default()),
        Arc::new(FakeChannels::new(backend)),
        Arc::new(MemorySessionStore::default()),
    )
}
