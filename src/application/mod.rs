// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between a UI (the CLI, or any other shell) and the services
// - Translates between DTOs and domain entities
// - Maps errors to display messages

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod routes;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType, ToErrorResponse};
pub use routes::{guard, Route, RouteDecision};
pub use state::AppState;
