// src/application/commands/auth_commands.rs

use crate::application::dto::SessionDto;
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::domain::Credentials;
use crate::integrations::IdentityProvider;

pub async fn sign_in(state: &AppState, email: &str, password: &str) -> CommandResult<SessionDto> {
    let principal = state
        .admin_service
        .sign_in(Credentials::new(email, password))
        .await?;
    Ok(SessionDto::from(principal))
}

pub async fn sign_out(state: &AppState) -> CommandResult<()> {
    state.admin_service.sign_out().await?;
    Ok(())
}

pub fn current_session(state: &AppState) -> Option<SessionDto> {
    state.identity.current_session().map(SessionDto::from)
}

/// Provision an admin account; does not sign in
pub async fn register_admin(
    state: &AppState,
    email: &str,
    password: &str,
) -> CommandResult<SessionDto> {
    let principal = state
        .identity
        .register_admin(Credentials::new(email, password))
        .await?;
    Ok(SessionDto::from(principal))
}
