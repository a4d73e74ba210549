use thiserror::Error;

use crate::db_types::{NewUserAccount, ProfileUpdate, UserAccount};

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Email already registered. Please log in.")]
    AccountAlreadyExists,
    #[error("Email is not registered")]
    EmailNotRegistered,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Wrong email or security answer")]
    WrongSecurityAnswer,
    #[error("User not found")]
    AccountNotFound,
    #[error("Could not process credentials: {0}")]
    HashingError(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

/// The `AuthManagement` trait defines the account operations needed for authentication and authorisation.
///
/// Credentials themselves are stateless (signed tokens), so the backend only needs to answer "who is this" questions:
/// by email at login, and by id whenever a token is presented or a role must be checked. Roles are always read
/// from the backend, never from the token, so a demoted administrator loses access on the very next request.
#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Creates a new account. If the email address is already registered, [`AuthApiError::AccountAlreadyExists`] is
    /// returned.
    async fn create_account(&self, account: NewUserAccount) -> Result<UserAccount, AuthApiError>;

    async fn fetch_account_by_id(&self, account_id: i64) -> Result<Option<UserAccount>, AuthApiError>;

    async fn fetch_account_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthApiError>;

    /// Replaces the password hash for the account. Returns [`AuthApiError::AccountNotFound`] if the account does not
    /// exist.
    async fn update_password(&self, account_id: i64, password_hash: &str) -> Result<(), AuthApiError>;

    /// Applies the non-empty fields of `update` to the account, returning the updated account, or `None` if the
    /// account does not exist.
    async fn update_profile(
        &self,
        account_id: i64,
        update: ProfileUpdate,
    ) -> Result<Option<UserAccount>, AuthApiError>;
}
