// src/integrations/mod.rs
//
// External Integrations Module
//
// Everything that talks to the outside world: the backend canister and the
// identity provider. Maps external data into domain types; never holds
// session state.

pub mod canister;
pub mod identity;

pub use canister::{AgentBackend, CallOutcome, EstateBackend};
pub use identity::{
    AgentChannelFactory, AuthorizationRequest, AuthorizedIdentity, ChannelFactory,
    IdentityProvider, IdentitySource, PemIdentityProvider,
};
