// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the UI and the services
// - Commands accept DTOs or plain values, return DTOs
// - Commands turn errors into `ErrorResponse`s
// - Commands NEVER contain business logic

pub mod property_commands;
pub mod session_commands;
pub mod token_commands;
pub mod transaction_commands;

pub use property_commands::*;
pub use session_commands::*;
pub use token_commands::*;
pub use transaction_commands::*;

use candid::Principal;

use crate::application::error_handling::{CommandResult, ErrorResponse};

fn parse_principal(text: &str) -> CommandResult<Principal> {
    Principal::from_text(text.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid principal: {}", e)))
}
