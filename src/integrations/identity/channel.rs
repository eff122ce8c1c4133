// src/integrations/identity/channel.rs
//
// Request channel construction
//
// A channel is an agent bound to one identity and one canister. Against a
// local replica the channel fetches and trusts the replica's root key before
// first use; against mainnet it never does.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use candid::Principal;
use ic_agent::{Agent, Identity};

use crate::config::{ClientConfig, Network};
use crate::error::{AppError, AppResult};
use crate::integrations::canister::{AgentBackend, EstateBackend};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait ChannelFactory: Send + Sync {
    async fn open(&self, identity: Arc<dyn Identity>) -> AppResult<Arc<dyn EstateBackend>>;
}

pub struct AgentChannelFactory {
    network: Network,
    host: String,
    canister_id: Principal,
    http_client: reqwest::Client,
}

impl AgentChannelFactory {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            network: config.network,
            host: config.host.clone(),
            canister_id: config.backend_canister_id,
            http_client,
        })
    }
}

#[async_trait]
impl ChannelFactory for AgentChannelFactory {
    async fn open(&self, identity: Arc<dyn Identity>) -> AppResult<Arc<dyn EstateBackend>> {
        let agent = Agent::builder()
            .with_url(self.host.as_str())
            .with_http_client(self.http_client.clone())
            .with_arc_identity(identity)
            .build()?;

        if self.network.fetches_root_key() {
            // A failed fetch leaves the agent usable for the mainnet key only;
            // calls will then fail verification and surface as transport errors.
            if let Err(e) = agent.fetch_root_key().await {
                log::warn!("Unable to fetch root key from {}: {}", self.host, e);
            }
        }

        log::info!(
            "Opened channel to canister {} on {} ({})",
            self.canister_id,
            self.host,
            self.network
        );
        Ok(Arc::new(AgentBackend::new(agent, self.canister_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::test_config;
    use ic_agent::identity::AnonymousIdentity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Replica stand-in answering 404 to everything, counting status requests
    async fn replica() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let status_hits = Arc::new(AtomicUsize::new(0));

        let hits = Arc::clone(&status_hits);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let hits = Arc::clone(&hits);
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    if request.starts_with(b"GET /api/v2/status") {
                        hits.fetch_add(1, Ordering::SeqCst);
                    }
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                        )
                        .await;
                });
            }
        });

        (url, status_hits)
    }

    fn factory(network: Network, host: String) -> AgentChannelFactory {
        AgentChannelFactory::new(&ClientConfig {
            network,
            host,
            ..test_config()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_local_channel_fetches_root_key() {
        let (url, status_hits) = replica().await;

        // The fetch fails against the stand-in; the channel still opens
        let opened = factory(Network::Local, url)
            .open(Arc::new(AnonymousIdentity))
            .await;

        assert!(opened.is_ok());
        assert!(status_hits.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_mainnet_channel_never_fetches_root_key() {
        let (url, status_hits) = replica().await;

        let opened = factory(Network::Ic, url)
            .open(Arc::new(AnonymousIdentity))
            .await;

        assert!(opened.is_ok());
        assert_eq!(status_hits.load(Ordering::SeqCst), 0);
    }
}
