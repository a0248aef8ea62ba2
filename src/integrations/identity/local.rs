// src/integrations/identity/local.rs
//
// Identity provider over the local `admin_accounts` table.
// Session state lives in a watch channel owned by the provider instance.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use tokio::sync::watch;
use uuid::Uuid;

use super::client::IdentityProvider;
use super::password::{hash_password, verify_password};
use crate::domain::{Credentials, Principal};
use crate::error::{AppError, AppResult};
use crate::repositories::{AccountRepository, AdminAccount};

pub struct LocalIdentityProvider {
    accounts: Arc<dyn AccountRepository>,
    session: watch::Sender<Option<Principal>>,
}

impl LocalIdentityProvider {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        let (session, _) = watch::channel(None);
        Self { accounts, session }
    }

    /// Provision an admin account. Does not start a session.
    pub async fn register_admin(&self, credentials: Credentials) -> AppResult<Principal> {
        let email = credentials.normalized_email();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Other("A valid email is required".to_string()));
        }
        if credentials.password.is_empty() {
            return Err(AppError::Other("Password is required".to_string()));
        }

        let accounts = Arc::clone(&self.accounts);
        let account_email = email.clone();
        let principal = tokio::task::spawn_blocking(move || -> AppResult<Principal> {
            let account = AdminAccount {
                id: Uuid::new_v4(),
                email: account_email,
                password_hash: hash_password(&credentials.password)?,
                created_at: Utc::now(),
            };
            accounts.insert(&account)?;
            Ok(principal_of(&account))
        })
        .await??;

        info!("Registered admin {}", email);
        Ok(principal)
    }
}

fn principal_of(account: &AdminAccount) -> Principal {
    Principal {
        uid: account.id.to_string(),
        email: account.email.clone(),
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn authenticate(&self, credentials: Credentials) -> AppResult<Principal> {
        let email = credentials.normalized_email();

        let accounts = Arc::clone(&self.accounts);
        let lookup = email.clone();
        let verified = tokio::task::spawn_blocking(move || -> AppResult<Option<Principal>> {
            let Some(account) = accounts.find_by_email(&lookup)? else {
                return Ok(None);
            };
            let matches = verify_password(&credentials.password, &account.password_hash)?;
            Ok(matches.then(|| principal_of(&account)))
        })
        .await?;

        let principal = match verified {
            Ok(Some(principal)) => principal,
            Ok(None) | Err(AppError::Auth) => {
                warn!("Authentication failed for {}", email);
                return Err(AppError::Auth);
            }
            Err(e) => return Err(e),
        };

        info!("Admin {} signed in", principal.email);
        self.session.send_replace(Some(principal.clone()));
        Ok(principal)
    }

    fn current_session(&self) -> Option<Principal> {
        self.session.borrow().clone()
    }

    fn watch_session(&self) -> watch::Receiver<Option<Principal>> {
        self.session.subscribe()
    }

    async fn end_session(&self) -> AppResult<()> {
        if let Some(previous) = self.session.send_replace(None) {
            info!("Admin {} signed out", previous.email);
        }
        Ok(())
    }
}
