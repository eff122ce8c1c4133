// src/application/commands/session_commands.rs
//
// Session Command Handlers

use crate::application::dto::SessionDto;
use crate::application::error_handling::{CommandResult, ToErrorResponse};
use crate::application::routes::{guard, Route, RouteDecision};
use crate::application::state::AppState;

/// Run the identity provider flow and open an authenticated channel
pub async fn login(state: &AppState) -> CommandResult<SessionDto> {
    let info = state.session.login().await.to_error_response("log in")?;
    Ok(SessionDto::from_info(Some(info), &state.config.network.to_string()))
}

pub async fn logout(state: &AppState) -> CommandResult<SessionDto> {
    state.session.logout().to_error_response("log out")?;
    Ok(current_session(state))
}

/// Resume a persisted session; an absent or stale one is not an error
pub async fn restore_session(state: &AppState) -> CommandResult<SessionDto> {
    let info = state
        .session
        .restore_session()
        .await
        .to_error_response("restore session")?;
    Ok(SessionDto::from_info(info, &state.config.network.to_string()))
}

pub fn current_session(state: &AppState) -> SessionDto {
    SessionDto::from_info(
        state.session.current(),
        &state.config.network.to_string(),
    )
}

/// Decide whether `path` may be shown with the current session
pub fn navigate(state: &AppState, path: &str) -> CommandResult<RouteDecision> {
    let route = path.parse::<Route>().to_error_response("navigate")?;
    Ok(guard(route, state.session.is_authenticated()))
}
