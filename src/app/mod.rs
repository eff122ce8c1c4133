// src/app/mod.rs
//
// Application wiring

pub mod bootstrap;

pub use bootstrap::{build_state, initialize, BootstrapOptions};
