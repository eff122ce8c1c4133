// src/integrations/canister/mod.rs
//
// Backend canister integration
//
// - `backend`: the `EstateBackend` seam every service calls through
// - `candid_types`: wire shapes, private to this module tree
// - `agent_client`: ic-agent implementation
// - `fake`: in-memory implementation for tests

pub mod agent_client;
pub mod backend;
mod candid_types;

#[cfg(test)]
pub mod fake;

pub use agent_client::AgentBackend;
pub use backend::{CallOutcome, EstateBackend};

#[cfg(test)]
pub use backend::MockEstateBackend;
