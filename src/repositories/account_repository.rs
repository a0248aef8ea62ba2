// src/repositories/account_repository.rs
//
// Admin account persistence. Stores Argon2id PHC hashes only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use super::movie_repository::{format_timestamp, parse_timestamp};
use crate::db::ConnectionPool;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: Uuid,
    /// Lower-cased
    pub email: String,
    /// PHC string, salt included
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub trait AccountRepository: Send + Sync {
    /// Fails if the email is already registered
    fn insert(&self, account: &AdminAccount) -> AppResult<()>;
    fn find_by_email(&self, email: &str) -> AppResult<Option<AdminAccount>>;
    fn count(&self) -> AppResult<i64>;
}

pub struct SqliteAccountRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAccountRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &Row) -> Result<AdminAccount, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at_str: String = row.get("created_at")?;

        Ok(AdminAccount {
            id,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            created_at: parse_timestamp(&created_at_str)?,
        })
    }
}

impl AccountRepository for SqliteAccountRepository {
    fn insert(&self, account: &AdminAccount) -> AppResult<()> {
        let conn = self.pool.get()?;

        let result = conn.execute(
            "INSERT INTO admin_accounts (id, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                account.id.to_string(),
                account.email,
                account.password_hash,
                format_timestamp(&account.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(AppError::Other(format!(
                    "Admin account {} already exists",
                    account.email
                )))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<AdminAccount>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, email, password_hash, created_at
             FROM admin_accounts WHERE email = ?1",
        )?;

        match stmt.query_row(params![email], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM admin_accounts", [], |row| row.get(0))?;

        Ok(count)
    }
}
