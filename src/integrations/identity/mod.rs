// src/integrations/identity/mod.rs

pub mod channel;
pub mod provider;

pub use channel::{AgentChannelFactory, ChannelFactory};
pub use provider::{
    load_pem_identity, AuthorizationRequest, AuthorizedIdentity, IdentityProvider,
    IdentitySource, PemIdentityProvider,
};
