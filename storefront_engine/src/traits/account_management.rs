use thiserror::Error;

use crate::db_types::UserAccount;

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User not found")]
    AccountNotFound,
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

/// Administrative, read-only access to user accounts.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches every account, most recently created first.
    async fn fetch_all_accounts(&self) -> Result<Vec<UserAccount>, AccountApiError>;

    /// Fetches the user account associated with the given account id. If no account exists, `None` is returned.
    async fn fetch_user_account(&self, account_id: i64) -> Result<Option<UserAccount>, AccountApiError>;
}
