// src/integrations/identity/client.rs
//
// Identity Provider collaborator surface.
// Injected into whatever needs session gating; there is no global session.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Credentials, Principal};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Starts a session on success. Any failure is `AppError::Auth`,
    /// whether the account is unknown or the password is wrong.
    async fn authenticate(&self, credentials: Credentials) -> AppResult<Principal>;

    fn current_session(&self) -> Option<Principal>;

    /// Observable of the session; the current value is visible immediately
    fn watch_session(&self) -> watch::Receiver<Option<Principal>>;

    async fn end_session(&self) -> AppResult<()>;
}
