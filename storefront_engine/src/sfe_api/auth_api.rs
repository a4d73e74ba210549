//! Account registration, login and password management.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewUserAccount, ProfileUpdate, Role, UserAccount},
    helpers::{hash_secret, is_valid_email, verify_secret},
    sfe_api::account_objects::{ProfileChanges, Registration},
    traits::{AuthApiError, AuthManagement},
};

pub struct AuthApi<B> {
    db: B,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

fn required(value: &str, message: &str) -> Result<(), AuthApiError> {
    if value.trim().is_empty() {
        Err(AuthApiError::ValidationError(message.to_string()))
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn hash(secret: &str) -> Result<String, AuthApiError> {
    hash_secret(secret).map_err(|e| AuthApiError::HashingError(e.to_string()))
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Validates the registration form and creates a standard (non-admin) account. The password and the security
    /// answer are stored as argon2 hashes.
    pub async fn register(&self, form: Registration) -> Result<UserAccount, AuthApiError> {
        required(&form.name, "Name is required")?;
        required(&form.email, "Email is required")?;
        if !is_valid_email(form.email.trim()) {
            return Err(AuthApiError::ValidationError("Invalid Email Format".to_string()));
        }
        required(&form.password, "Password is required")?;
        required(&form.phone, "Phone number is required")?;
        required(&form.address, "Address is required")?;
        required(&form.answer, "Security answer is required")?;
        let email = form.email.trim().to_string();
        if self.db.fetch_account_by_email(&email).await?.is_some() {
            return Err(AuthApiError::AccountAlreadyExists);
        }
        let account = NewUserAccount {
            name: form.name.trim().to_string(),
            email,
            password_hash: hash(&form.password)?,
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
            answer_hash: hash(&form.answer)?,
            role: Role::User,
        };
        let account = self.db.create_account(account).await?;
        info!("🔐️ New account #{} registered", account.id);
        Ok(account)
    }

    /// Checks the email and password and returns the matching account. Issuing a credential is left to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount, AuthApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthApiError::ValidationError("Email and password are required".to_string()));
        }
        let account = self.db.fetch_account_by_email(email.trim()).await?.ok_or(AuthApiError::EmailNotRegistered)?;
        let matches = verify_secret(password, &account.password_hash).map_err(|e| {
            error!("🔐️ Account #{} has an unusable password hash. {e}", account.id);
            AuthApiError::HashingError(e.to_string())
        })?;
        if !matches {
            debug!("🔐️ Invalid password for account #{}", account.id);
            return Err(AuthApiError::InvalidPassword);
        }
        debug!("🔐️ Account #{} logged in", account.id);
        Ok(account)
    }

    /// Sets a new password if the security answer matches the one given at registration. An unknown email and a
    /// wrong answer produce the same error.
    pub async fn reset_password(&self, email: &str, answer: &str, new_password: &str) -> Result<(), AuthApiError> {
        required(email, "Email is required")?;
        required(answer, "Security answer is required")?;
        required(new_password, "New password is required")?;
        let account =
            self.db.fetch_account_by_email(email.trim()).await?.ok_or(AuthApiError::WrongSecurityAnswer)?;
        let matches = verify_secret(answer, &account.answer_hash).unwrap_or_else(|e| {
            warn!("🔐️ Account #{} has an unusable security answer hash. {e}", account.id);
            false
        });
        if !matches {
            return Err(AuthApiError::WrongSecurityAnswer);
        }
        self.db.update_password(account.id, &hash(new_password)?).await?;
        info!("🔐️ Password reset for account #{}", account.id);
        Ok(())
    }

    /// Applies profile changes for the account. At least one non-blank field must be supplied.
    pub async fn update_profile(&self, account_id: i64, changes: ProfileChanges) -> Result<UserAccount, AuthApiError> {
        let email = non_blank(changes.email).map(|e| e.trim().to_string());
        if let Some(email) = &email {
            if !is_valid_email(email) {
                return Err(AuthApiError::ValidationError("Invalid Email Format".to_string()));
            }
        }
        let password_hash = match non_blank(changes.password) {
            Some(p) => Some(hash(&p)?),
            None => None,
        };
        let update = ProfileUpdate {
            name: non_blank(changes.name),
            email,
            phone: non_blank(changes.phone),
            address: non_blank(changes.address),
            password_hash,
        };
        if update.is_empty() {
            return Err(AuthApiError::ValidationError(
                "At least one field is required to update the profile.".to_string(),
            ));
        }
        let account = self.db.update_profile(account_id, update).await?.ok_or(AuthApiError::AccountNotFound)?;
        debug!("🔐️ Profile updated for account #{account_id}");
        Ok(account)
    }

    pub async fn account_by_id(&self, account_id: i64) -> Result<Option<UserAccount>, AuthApiError> {
        self.db.fetch_account_by_id(account_id).await
    }

    /// The account's current role, read live from the backend. `None` if the account no longer exists.
    pub async fn role_for_account(&self, account_id: i64) -> Result<Option<Role>, AuthApiError> {
        let account = self.db.fetch_account_by_id(account_id).await?;
        Ok(account.map(|a| a.role))
    }
}
