//! Unifies API for accessing accounts.

use std::fmt::Debug;

use log::trace;

use crate::{
    db_types::UserAccount,
    traits::{AccountApiError, AccountManagement},
};

/// The `AccountApi` provides the administrative view over user accounts.
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Fetches the user account for the given account id. If no account exists, `None` is returned.
    pub async fn account_by_id(&self, account_id: i64) -> Result<Option<UserAccount>, AccountApiError> {
        self.db.fetch_user_account(account_id).await
    }

    /// All accounts, newest first.
    pub async fn all_accounts(&self) -> Result<Vec<UserAccount>, AccountApiError> {
        let accounts = self.db.fetch_all_accounts().await?;
        trace!("Fetched {} accounts", accounts.len());
        Ok(accounts)
    }
}
