// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Local persistence that supports the services but carries no business
// meaning of its own.

pub mod session_store;

pub use session_store::{FileSessionStore, SessionStore, StoredSession};
