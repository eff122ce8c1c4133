// src/config/mod.rs
//
// Client configuration
//
// Values come from the environment the frontend build used (`DFX_NETWORK`,
// `CANISTER_ID_*`) and can be overridden by CLI flags in `main.rs`.

use candid::Principal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::time::MAX_SESSION_TTL_NANOS;
use crate::error::{AppError, AppResult};

pub const ENV_NETWORK: &str = "DFX_NETWORK";
pub const ENV_BACKEND_CANISTER: &str = "CANISTER_ID_TEST_IREITS_BACKEND";
pub const ENV_IDENTITY_CANISTER: &str = "CANISTER_ID_INTERNET_IDENTITY";
pub const ENV_HOST: &str = "IREITS_HOST";
pub const ENV_SESSION_FILE: &str = "IREITS_SESSION_FILE";

const LOCAL_HOST: &str = "http://localhost:4943";
const MAINNET_HOST: &str = "https://ic0.app";
const MAINNET_IDENTITY_PROVIDER: &str = "https://identity.ic0.app";

/// Replica environment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Local replica started by `dfx start`
    Local,
    /// Internet Computer mainnet
    Ic,
}

impl Network {
    pub fn default_host(self) -> &'static str {
        match self {
            Network::Local => LOCAL_HOST,
            Network::Ic => MAINNET_HOST,
        }
    }

    /// Only a local replica has an untrusted root key that must be fetched.
    /// Mainnet's key is compiled into the agent and must never be replaced.
    pub fn fetches_root_key(self) -> bool {
        matches!(self, Network::Local)
    }
}

impl FromStr for Network {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Network::Local),
            "ic" | "mainnet" => Ok(Network::Ic),
            other => Err(AppError::Config(format!("Unknown network '{}'", other))),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Local => write!(f, "local"),
            Network::Ic => write!(f, "ic"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub network: Network,

    /// Replica URL; defaults to the network's well-known host
    pub host: String,

    /// Property/token/transaction canister
    pub backend_canister_id: Principal,

    /// Internet Identity canister on a local replica (unused on mainnet)
    pub identity_canister_id: Option<Principal>,

    /// Where a logged-in session is persisted for restore
    pub session_file: PathBuf,

    /// Maximum delegation lifetime requested from the identity provider
    pub max_time_to_live_nanos: u64,
}

impl ClientConfig {
    pub fn new(network: Network, backend_canister_id: Principal) -> AppResult<Self> {
        Ok(Self {
            network,
            host: network.default_host().to_string(),
            backend_canister_id,
            identity_canister_id: None,
            session_file: default_session_file()?,
            max_time_to_live_nanos: MAX_SESSION_TTL_NANOS,
        })
    }

    /// Build from process environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// `DFX_NETWORK` defaults to `local` like the dfx-generated frontend.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network = lookup(ENV_NETWORK)
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(Network::Local);

        let backend = lookup(ENV_BACKEND_CANISTER).ok_or_else(|| {
            AppError::Config(format!("{} is not set", ENV_BACKEND_CANISTER))
        })?;
        let backend_canister_id = parse_canister_id(ENV_BACKEND_CANISTER, &backend)?;

        let mut config = Self::new(network, backend_canister_id)?;

        if let Some(id) = lookup(ENV_IDENTITY_CANISTER) {
            config.identity_canister_id = Some(parse_canister_id(ENV_IDENTITY_CANISTER, &id)?);
        }
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(path) = lookup(ENV_SESSION_FILE) {
            config.session_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// URL of the identity provider for this network
    pub fn identity_provider_url(&self) -> AppResult<String> {
        match self.network {
            Network::Ic => Ok(MAINNET_IDENTITY_PROVIDER.to_string()),
            Network::Local => {
                let canister = self.identity_canister_id.ok_or_else(|| {
                    AppError::Config(format!(
                        "{} is required on a local network",
                        ENV_IDENTITY_CANISTER
                    ))
                })?;
                Ok(format!("{}?canisterId={}", LOCAL_HOST, canister))
            }
        }
    }
}

fn parse_canister_id(key: &str, value: &str) -> AppResult<Principal> {
    Principal::from_text(value.trim())
        .map_err(|e| AppError::Config(format!("{} is not a valid canister id: {}", key, e)))
}

/// Session file path
///
/// Stored in the application data directory.
/// Path structure: {APP_DATA}/ireits/session.json
pub fn default_session_file() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("ireits").join("session.json"))
}
