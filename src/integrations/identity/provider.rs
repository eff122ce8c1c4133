// src/integrations/identity/provider.rs
//
// Identity providers
//
// A provider turns an authorization request (provider URL + maximum lifetime)
// into an identity the agent can sign with. The browser build runs the
// Internet Identity popup; the native client authorizes with a key file
// managed by `dfx identity`, which is the same key material the local test
// provider hands out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use candid::Principal;
use chrono::{DateTime, Duration, Utc};
use ic_agent::identity::{BasicIdentity, Secp256k1Identity};
use ic_agent::Identity;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Parameters of one authorization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Interactive provider page; `None` when the network has no identity
    /// canister configured
    pub provider_url: Option<String>,
    /// Requested lifetime in nanoseconds
    pub max_time_to_live_nanos: u64,
}

impl AuthorizationRequest {
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let nanos = i64::try_from(self.max_time_to_live_nanos).unwrap_or(i64::MAX);
        now + Duration::nanoseconds(nanos)
    }
}

/// Where an authorized identity came from, so it can be re-obtained without
/// interaction when a session is restored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdentitySource {
    PemFile { path: PathBuf },
}

/// Outcome of a successful authorization
#[derive(Clone)]
pub struct AuthorizedIdentity {
    pub identity: Arc<dyn Identity>,
    pub principal: Principal,
    pub source: IdentitySource,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AuthorizedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedIdentity")
            .field("principal", &self.principal.to_text())
            .field("source", &self.source)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the (possibly interactive) authorization flow.
    /// Cancellation and provider failures are `AppError::Auth`.
    async fn authorize(&self, request: &AuthorizationRequest) -> AppResult<AuthorizedIdentity>;

    /// Re-obtain a previously authorized identity without interaction
    async fn resume(&self, source: &IdentitySource) -> AppResult<Arc<dyn Identity>>;
}

/// Authorizes with a PEM-encoded Ed25519 or secp256k1 key
pub struct PemIdentityProvider {
    path: PathBuf,
}

impl PemIdentityProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Load a PEM key, trying Ed25519 first and then secp256k1
pub fn load_pem_identity(path: &Path) -> AppResult<Arc<dyn Identity>> {
    if !path.exists() {
        return Err(AppError::Auth(format!(
            "Identity file {} not found",
            path.display()
        )));
    }

    match BasicIdentity::from_pem_file(path) {
        Ok(identity) => Ok(Arc::new(identity)),
        Err(ed25519_err) => match Secp256k1Identity::from_pem_file(path) {
            Ok(identity) => Ok(Arc::new(identity)),
            Err(secp_err) => Err(AppError::Auth(format!(
                "Could not read identity from {}: {}; {}",
                path.display(),
                ed25519_err,
                secp_err
            ))),
        },
    }
}

pub(crate) fn sender_of(identity: &dyn Identity) -> AppResult<Principal> {
    identity
        .sender()
        .map_err(|e| AppError::Auth(format!("Identity has no principal: {}", e)))
}

#[async_trait]
impl IdentityProvider for PemIdentityProvider {
    async fn authorize(&self, request: &AuthorizationRequest) -> AppResult<AuthorizedIdentity> {
        log::info!(
            "Authorizing with key file {} (provider {})",
            self.path.display(),
            request.provider_url.as_deref().unwrap_or("none")
        );

        let identity = load_pem_identity(&self.path)?;
        let principal = sender_of(identity.as_ref())?;

        Ok(AuthorizedIdentity {
            identity,
            principal,
            source: IdentitySource::PemFile {
                path: self.path.clone(),
            },
            expires_at: request.expires_at(Utc::now()),
        })
    }

    async fn resume(&self, source: &IdentitySource) -> AppResult<Arc<dyn Identity>> {
        match source {
            IdentitySource::PemFile { path } => load_pem_identity(path),
        }
    }
}
